//! Relay cursor connections over store paginators, built on
//! `async_graphql::dynamic`.
//!
//! GraphQL Cursor Connections Spec: https://relay.dev/graphql/connections.htm

pub mod config;
pub mod paginator;
pub mod schema;
pub mod spec;
pub mod testing;
pub mod types;

pub(self) mod self_prelude {
    pub use anyhow::anyhow;
    pub use async_trait::async_trait;
    pub use extension_trait::extension_trait;
}
