use crate::fumen::action::Action;
use crate::fumen::comment::write_comment;
use crate::fumen::decoder::UNCHANGED_FIELD;
use crate::fumen::error::FumenResult;
use crate::fumen::field::{Field, FIELD_BLOCKS};
use crate::fumen::page::Page;
use crate::fumen::values::Values;

pub const VERSION_PREFIX: &str = "v115@";
const MAX_REPEAT: u32 = 63;
const HEAD_LENGTH: usize = 42;
const CHUNK_LENGTH: usize = 47;

fn field_runs(prev: &Field, current: &Field) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut run_diff: Option<u32> = None;
    let mut run_length = 0u32;

    for (before, after) in prev.cells().iter().zip(current.cells()) {
        let diff = (after.number() as i32 - before.number() as i32 + 8) as u32;
        match run_diff {
            Some(value) if value == diff => run_length += 1,
            Some(value) => {
                runs.push(value * FIELD_BLOCKS as u32 + run_length - 1);
                run_diff = Some(diff);
                run_length = 1;
            }
            None => {
                run_diff = Some(diff);
                run_length = 1;
            }
        }
    }
    if let Some(value) = run_diff {
        runs.push(value * FIELD_BLOCKS as u32 + run_length - 1);
    }
    runs
}

struct FieldWriter {
    repeat_index: Option<usize>,
}

impl FieldWriter {
    fn write(&mut self, values: &mut Values, prev: &Field, current: &Field) {
        let runs = field_runs(prev, current);
        if runs != [UNCHANGED_FIELD] {
            for run in runs {
                values.push(run, 2);
            }
            self.repeat_index = None;
            return;
        }

        let repeat = self
            .repeat_index
            .and_then(|index| values.get(index).map(|count| (index, count)));
        match repeat {
            Some((index, count)) if count < MAX_REPEAT => values.set(index, count + 1),
            _ => {
                values.push(UNCHANGED_FIELD, 2);
                values.push(0, 1);
                self.repeat_index = Some(values.len() - 1);
            }
        }
    }
}

/// Inserts `?` separators the way viewers emit long codes.
fn split_data(data: &str) -> String {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() < HEAD_LENGTH - 1 {
        return data.to_string();
    }
    let head_end = HEAD_LENGTH.min(chars.len());
    let mut parts = vec![chars[..head_end].iter().collect::<String>()];
    parts.extend(
        chars[head_end..]
            .chunks(CHUNK_LENGTH)
            .map(|chunk| chunk.iter().collect::<String>()),
    );
    parts.join("?")
}

pub fn encode(pages: &[Page]) -> FumenResult<String> {
    let mut values = Values::new();
    let mut writer = FieldWriter { repeat_index: None };
    let mut prev_field = Field::empty();
    let mut prev_comment = String::new();

    for (index, page) in pages.iter().enumerate() {
        writer.write(&mut values, &prev_field, &page.field);

        let comment = page
            .comment
            .as_deref()
            .filter(|text| *text != prev_comment);
        let action = Action {
            operation: page.operation,
            rise: page.flags.rise,
            mirror: page.flags.mirror,
            colorize: index == 0 && page.flags.colorize,
            comment: comment.is_some(),
            lock: page.flags.lock,
        };
        values.push(action.encode(), 3);

        if let Some(text) = comment {
            write_comment(&mut values, text);
            prev_comment = text.to_string();
        }
        prev_field = page.settled_field()?;
    }

    Ok(format!("{}{}", VERSION_PREFIX, split_data(&values.to_data())))
}
