use crate::fumen::error::{FumenError, FumenResult};
use std::collections::VecDeque;

const ENCODE_TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE: u32 = 64;

fn decode_char(ch: char) -> Option<u32> {
    match ch {
        'A'..='Z' => Some(ch as u32 - 'A' as u32),
        'a'..='z' => Some(ch as u32 - 'a' as u32 + 26),
        '0'..='9' => Some(ch as u32 - '0' as u32 + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}

/// Base-64 digit stream. Multi-digit values are little-endian.
#[derive(Debug, Default)]
pub struct Values {
    digits: VecDeque<u32>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(data: &str) -> FumenResult<Self> {
        let digits = data
            .chars()
            .enumerate()
            .map(|(position, ch)| decode_char(ch).ok_or(FumenError::InvalidCharacter { ch, position }))
            .collect::<FumenResult<VecDeque<u32>>>()?;
        Ok(Self { digits })
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn poll(&mut self, count: usize) -> FumenResult<u32> {
        let mut value = 0;
        let mut weight = 1;
        for _ in 0..count {
            let digit = self.digits.pop_front().ok_or(FumenError::UnexpectedEnd)?;
            value += digit * weight;
            weight *= BASE;
        }
        Ok(value)
    }

    pub fn push(&mut self, value: u32, count: usize) {
        let mut current = value;
        for _ in 0..count {
            self.digits.push_back(current % BASE);
            current /= BASE;
        }
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.digits.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: u32) {
        if let Some(digit) = self.digits.get_mut(index) {
            *digit = value % BASE;
        }
    }

    pub fn to_data(&self) -> String {
        self.digits
            .iter()
            .map(|&digit| ENCODE_TABLE[digit as usize] as char)
            .collect()
    }
}
