//! In-memory paginators and fixtures for exercising connections.

pub mod fixtures;
pub mod paginator;
pub mod schema;

pub mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use crate::paginator::*;
    pub use crate::types::*;
    pub use serde_json::{json, Value};
    pub use std::sync::Arc;
}

pub use fixtures::*;
pub use paginator::*;
pub use schema::*;

pub mod prelude {
    pub use super::fixtures::*;
    pub use super::paginator::*;
    pub use super::schema::*;
    pub use crate::config::*;
    pub use crate::paginator::*;
    pub use crate::schema::*;
    pub use crate::types::*;
}
