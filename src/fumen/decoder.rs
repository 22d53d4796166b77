use crate::fumen::action::Action;
use crate::fumen::comment::read_comment;
use crate::fumen::error::{FumenError, FumenResult};
use crate::fumen::field::{Field, Piece, FIELD_BLOCKS};
use crate::fumen::page::{Page, PageFlags};
use crate::fumen::values::Values;
use regex::Regex;
use std::sync::OnceLock;

/// Run value of a page whose field is identical to the previous one.
pub(crate) const UNCHANGED_FIELD: u32 = 8 * FIELD_BLOCKS as u32 + FIELD_BLOCKS as u32 - 1;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[vmd]115@").expect("version pattern is valid"))
}

/// Pulls the v115 payload out of a bare code or a viewer URL.
pub fn extract_data(input: &str) -> FumenResult<String> {
    let without_params = input.split('&').next().unwrap_or_default();
    let found = version_pattern()
        .find(without_params)
        .ok_or(FumenError::UnsupportedVersion)?;
    Ok(without_params[found.end()..]
        .chars()
        .filter(|ch| *ch != '?' && !ch.is_whitespace())
        .collect())
}

/// Applies one page of run-length diffs to `prev`. The flag is false when
/// the page declared its field unchanged.
fn read_field(values: &mut Values, prev: &Field) -> FumenResult<(Field, bool)> {
    let mut field = prev.clone();
    let mut changed = true;
    let mut index = 0;
    {
        let cells = field.cells_mut();
        while index < FIELD_BLOCKS {
            let run = values.poll(2)?;
            let diff = (run / FIELD_BLOCKS as u32) as i32 - 8;
            let length = (run % FIELD_BLOCKS as u32) as usize + 1;
            if run == UNCHANGED_FIELD {
                changed = false;
            }
            if index + length > FIELD_BLOCKS {
                return Err(FumenError::FieldOverflow);
            }
            for cell in &mut cells[index..index + length] {
                let value = cell.number() as i32 + diff;
                let number = u32::try_from(value).map_err(|_| FumenError::FieldOverflow)?;
                *cell = Piece::from_number(number)?;
            }
            index += length;
        }
    }
    Ok((field, changed))
}

pub fn decode(code: &str) -> FumenResult<Vec<Page>> {
    let data = extract_data(code)?;
    let mut values = Values::parse(&data)?;

    let mut pages: Vec<Page> = Vec::new();
    let mut prev_field = Field::empty();
    let mut prev_comment = String::new();
    let mut colorize = true;
    let mut repeat = 0;

    while !values.is_empty() {
        let field = if repeat > 0 {
            repeat -= 1;
            prev_field.clone()
        } else {
            let (field, changed) = read_field(&mut values, &prev_field)?;
            if !changed {
                repeat = values.poll(1)?;
            }
            field
        };

        let action = Action::decode(values.poll(3)?)?;
        if action.comment {
            prev_comment = read_comment(&mut values)?;
        }
        if pages.is_empty() {
            colorize = action.colorize;
        }

        let page = Page {
            field,
            comment: Some(prev_comment.clone()),
            operation: action.operation,
            flags: PageFlags {
                lock: action.lock,
                rise: action.rise,
                mirror: action.mirror,
                colorize,
            },
        };
        prev_field = page.settled_field()?;
        pages.push(page);
    }

    Ok(pages)
}
