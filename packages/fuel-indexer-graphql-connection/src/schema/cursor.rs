//! Opaque cursor encoding. A cursor on the wire is the base64 text of the
//! JSON array `[orderingName, cursor]`, where `orderingName` is `null` for
//! paginators without orderings.

use super::self_prelude::*;
use base64::{engine::general_purpose::STANDARD, Engine};

#[derive(Clone, Debug, PartialEq)]
pub struct NamespacedCursor {
    pub ordering_name: Option<String>,
    pub cursor: Cursor,
}

impl NamespacedCursor {
    pub fn new(ordering: Option<&Ordering>, cursor: Cursor) -> Self {
        Self {
            ordering_name: ordering.map(|ordering| ordering.name().to_string()),
            cursor,
        }
    }
}

pub type CursorResult<T> = Result<T, CursorError>;

#[derive(thiserror::Error, Debug)]
pub enum CursorError {
    #[error("Cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Cursor does not hold an `[ordering, cursor]` pair: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize_cursor(cursor: &NamespacedCursor) -> CursorResult<String> {
    let pair = (&cursor.ordering_name, &cursor.cursor);
    let json = serde_json::to_vec(&pair)?;
    Ok(STANDARD.encode(json))
}

pub fn deserialize_cursor(text: &str) -> CursorResult<NamespacedCursor> {
    let json = STANDARD.decode(text)?;
    let (ordering_name, cursor): (Option<String>, Cursor) = serde_json::from_slice(&json)?;
    Ok(NamespacedCursor {
        ordering_name,
        cursor,
    })
}
