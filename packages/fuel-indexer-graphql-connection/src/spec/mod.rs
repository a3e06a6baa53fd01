//! `async_graphql::dynamic` extensions for the Relay connection types.
//!
//! GraphQL Spec: https://spec.graphql.org/draft/
//! GraphQL Docs: https://graphql.org/learn/pagination/
//! GraphQL Cursor Connections Spec: https://relay.dev/graphql/connections.htm

pub mod connection;
pub mod ordering;
pub mod paging;

pub(self) mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use async_graphql::dynamic::*;
    pub use async_graphql_value::{ConstValue, Name};
}

pub use connection::*;
pub use ordering::*;
pub use paging::*;
