pub mod build_context;
pub mod connection_field;
pub mod cursor;
pub mod error;
pub mod names;
pub mod output;
pub mod resolver;
pub mod resolver_context;
pub mod schema_builder;
pub mod type_cache;

pub(self) mod self_prelude {
    pub use super::super::self_prelude::*;
    pub use crate::config::*;
    pub use crate::paginator::*;
    pub use crate::spec::*;
    pub use crate::types::*;
    pub use async_graphql::dynamic::{
        Enum, EnumItem, Field, FieldFuture, FieldValue, InputObject, InputValue, Object,
        ResolverContext, Scalar, Schema, Type as DynType, TypeRef, ValueAccessor,
    };
    pub use async_graphql_value::{ConstValue, Name};
    pub use indexmap::IndexMap;
    pub use serde_json::Value;
    pub use std::collections::{HashMap, HashSet};
    pub use std::fmt;
    pub use std::sync::Arc;
    pub use tracing::{debug, info, warn};
}

pub use build_context::*;
pub use connection_field::*;
pub use cursor::*;
pub use error::*;
pub use names::*;
pub use output::*;
pub use resolver::*;
pub use resolver_context::*;
pub use schema_builder::*;
pub use type_cache::*;
