use crate::domain::model::RecordOrigin;
use crate::fumen::{self, Page};
use crate::utils::error::{Result, ToolError};
use std::fmt::Write;

/// Renders every page of a code as text, or as JSON when `json` is set.
pub fn inspect(code: &str, json: bool) -> Result<String> {
    let pages = fumen::decode(code)
        .map_err(|e| ToolError::decode(RecordOrigin::Argument(1).to_string(), code, e))?;
    tracing::debug!("Decoded {} pages", pages.len());

    if json {
        return Ok(serde_json::to_string_pretty(&pages)?);
    }
    Ok(render_pages(&pages))
}

fn render_pages(pages: &[Page]) -> String {
    let mut out = String::new();
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "Page {}", index + 1);
        if !page.comment_text().is_empty() {
            let _ = writeln!(out, "Comment: {}", page.comment_text());
        }
        if let Some(op) = &page.operation {
            let _ = writeln!(
                out,
                "Operation: {:?} {:?} at ({}, {})",
                op.piece, op.rotation, op.x, op.y
            );
        }
        let _ = writeln!(out, "{}", page.field);
    }
    out.trim_end().to_string()
}
