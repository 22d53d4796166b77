//! Fumen v115 codec.
//!
//! A fumen code is a base-64 stream of pages. Each page stores its field as a
//! run-length diff against the previous page's settled field, an action word
//! (piece placement and flags) and, when it changes, a comment.

pub mod action;
pub mod comment;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod field;
pub mod page;
pub mod values;

pub use decoder::decode;
pub use encoder::{encode, VERSION_PREFIX};
pub use error::{FumenError, FumenResult};
pub use field::{Field, Operation, Piece, Rotation};
pub use page::{Page, PageFlags};

/// Decodes `code` and returns its first page. Later pages are discarded.
pub fn first_page(code: &str) -> FumenResult<Page> {
    decode(code)?.into_iter().next().ok_or(FumenError::NoPages)
}
