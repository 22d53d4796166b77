use crate::fumen::field::{Field, Operation};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageFlags {
    /// Stamp the operation into the field before the next page.
    pub lock: bool,
    pub rise: bool,
    pub mirror: bool,
    pub colorize: bool,
}

impl Default for PageFlags {
    fn default() -> Self {
        Self {
            lock: true,
            rise: false,
            mirror: false,
            colorize: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Page {
    pub field: Field,
    pub comment: Option<String>,
    pub operation: Option<Operation>,
    pub flags: PageFlags,
}

impl Page {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            ..Self::default()
        }
    }

    pub fn with_comment(field: Field, comment: Option<String>) -> Self {
        Self {
            field,
            comment,
            ..Self::default()
        }
    }

    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// The field the following page is diffed against.
    pub(crate) fn settled_field(&self) -> crate::fumen::FumenResult<Field> {
        let mut field = self.field.clone();
        if self.flags.lock {
            if let Some(operation) = self.operation.filter(|op| op.piece.is_mino()) {
                field.fill(&operation)?;
            }
            field.clear_lines();
            if self.flags.rise {
                field.rise_garbage();
            }
            if self.flags.mirror {
                field.mirror();
            }
        }
        Ok(field)
    }
}
