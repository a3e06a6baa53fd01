//! The store-side contract a connection is built over.

pub mod condition;
pub mod context;
pub mod ordering;
pub mod page;
#[allow(clippy::module_inception)]
pub mod paginator;

pub(self) mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;
    pub use std::fmt;
    pub use std::sync::Arc;
}

pub use condition::*;
pub use context::*;
pub use ordering::*;
pub use page::*;
pub use paginator::*;
