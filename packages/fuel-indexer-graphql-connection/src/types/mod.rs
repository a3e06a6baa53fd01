//! Value-level type descriptors over the untyped `serde_json::Value` domain.
//!
//! Types are built once while a schema is assembled and are immutable
//! afterwards, so every descriptor is shared through an `Arc`.

pub mod alias;
pub mod named;
pub mod ty;

pub(self) mod self_prelude {
    pub use indexmap::IndexMap;
    pub use serde_json::Value;
    pub use std::fmt;
    pub use std::sync::Arc;
}

pub use alias::*;
pub use named::*;
pub use ty::*;
