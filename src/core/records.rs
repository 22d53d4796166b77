use crate::domain::model::{FumenCode, InputRecord, RecordOrigin};
use crate::fumen::{self, Page};
use crate::utils::error::{Result, ToolError};

pub fn records_from_args(codes: &[String]) -> Vec<InputRecord> {
    codes
        .iter()
        .enumerate()
        .map(|(index, code)| InputRecord {
            origin: RecordOrigin::Argument(index + 1),
            code: FumenCode::new(code.trim()),
            comment: None,
        })
        .collect()
}

/// One bare code per line. Blank lines are skipped.
pub fn parse_code_lines(text: &str) -> Vec<InputRecord> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let code = line.trim();
            (!code.is_empty()).then(|| InputRecord {
                origin: RecordOrigin::Line(index + 1),
                code: FumenCode::new(code),
                comment: None,
            })
        })
        .collect()
}

/// `code,comment` records. Everything after the first comma is the comment,
/// so commas and quotes inside a comment survive as written.
pub fn parse_commented_lines(text: &str) -> Result<Vec<InputRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        let line = row
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(index + 1);
        let code = row.get(0).unwrap_or_default().trim();
        let comment = (row.len() > 1).then(|| {
            row.iter()
                .skip(1)
                .collect::<Vec<_>>()
                .join(",")
                .trim_end()
                .to_string()
        });

        records.push(InputRecord {
            origin: RecordOrigin::Line(line),
            code: FumenCode::new(code),
            comment,
        });
    }
    Ok(records)
}

pub fn decode_first_page(record: &InputRecord) -> Result<Page> {
    fumen::first_page(record.code.as_str())
        .map_err(|e| ToolError::decode(record.origin.to_string(), record.code.as_str(), e))
}

pub fn encode_pages(pages: &[Page]) -> Result<FumenCode> {
    fumen::encode(pages)
        .map(FumenCode::new)
        .map_err(ToolError::EncodeError)
}
