//! Comment text packing.
//!
//! Comments are first percent-escaped (the legacy JavaScript `escape` scheme,
//! `%XX` below U+0100 and `%uXXXX` above), then packed four characters per
//! value over the printable ASCII table.

use crate::fumen::error::FumenResult;
use crate::fumen::values::Values;

const COMMENT_TABLE: &[u8] =
    b" !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";
const COMMENT_RADIX: u32 = COMMENT_TABLE.len() as u32 + 1;
pub const MAX_COMMENT_LENGTH: usize = 4095;

fn is_unescaped(unit: u16) -> bool {
    u8::try_from(unit)
        .map(|byte| byte.is_ascii_alphanumeric() || b"@*_+-./".contains(&byte))
        .unwrap_or(false)
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for unit in text.encode_utf16() {
        if is_unescaped(unit) {
            escaped.push(unit as u8 as char);
        } else if unit < 0x100 {
            escaped.push_str(&format!("%{:02X}", unit));
        } else {
            escaped.push_str(&format!("%u{:04X}", unit));
        }
    }
    escaped
}

/// Reverses [`escape`]. Malformed escapes are kept as literal text.
pub fn unescape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let hex = |slice: &[char]| -> Option<u16> {
        if !slice.iter().all(char::is_ascii_hexdigit) {
            return None;
        }
        let digits: String = slice.iter().collect();
        u16::from_str_radix(&digits, 16).ok()
    };

    let mut index = 0;
    while index < chars.len() {
        if chars[index] == '%' {
            if chars.get(index + 1) == Some(&'u') && index + 6 <= chars.len() {
                if let Some(unit) = hex(&chars[index + 2..index + 6]) {
                    units.push(unit);
                    index += 6;
                    continue;
                }
            }
            if index + 3 <= chars.len() {
                if let Some(unit) = hex(&chars[index + 1..index + 3]) {
                    units.push(unit);
                    index += 3;
                    continue;
                }
            }
        }
        let mut buffer = [0u16; 2];
        units.extend_from_slice(chars[index].encode_utf16(&mut buffer));
        index += 1;
    }

    String::from_utf16_lossy(&units)
}

pub fn write_comment(values: &mut Values, text: &str) {
    let escaped: Vec<u8> = escape(text).into_bytes();
    let length = escaped.len().min(MAX_COMMENT_LENGTH);
    values.push(length as u32, 2);

    for chunk in escaped[..length].chunks(4) {
        let mut value = 0;
        let mut weight = 1;
        for byte in chunk {
            let index = COMMENT_TABLE
                .iter()
                .position(|candidate| candidate == byte)
                .unwrap_or(0) as u32;
            value += index * weight;
            weight *= COMMENT_RADIX;
        }
        values.push(value, 5);
    }
}

pub fn read_comment(values: &mut Values) -> FumenResult<String> {
    let length = values.poll(2)? as usize;
    let mut packed = String::with_capacity(length + 3);
    for _ in 0..length.div_ceil(4) {
        let mut value = values.poll(5)?;
        for _ in 0..4 {
            let index = (value % COMMENT_RADIX) as usize;
            packed.push(COMMENT_TABLE.get(index).copied().unwrap_or(b' ') as char);
            value /= COMMENT_RADIX;
        }
    }
    packed.truncate(length);
    Ok(unescape(&packed))
}
