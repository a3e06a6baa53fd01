use super::cursor::CursorError;
use super::output::ValueError;
use crate::paginator::PaginatorError;
use crate::types::TypeError;

pub type BuildResult<T> = Result<T, BuildError>;

/// Raised while a schema is assembled. Fatal to the build.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("Paginator {paginator} cannot have field conditions: `{type_name}` is not an object type")]
    FieldsConditionOnNonObject {
        paginator: String,
        type_name: String,
    },
    #[error("Paginator {paginator} declares default ordering {ordering} it does not list")]
    UnknownDefaultOrdering { paginator: String, ordering: String },
    #[error("Field condition argument {argument} of {paginator} shadows a connection argument")]
    ReservedArgument { paginator: String, argument: String },
    #[error("Enum {type_name} would have item {item} more than once")]
    DuplicateEnumItem { type_name: String, item: String },
    #[error("Type {0} is already defined in this schema")]
    DuplicateTypeName(String),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("Failed to finish schema: {0}")]
    Schema(String),
}

pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Raised while a connection field is resolved. Fatal to the field.
#[derive(thiserror::Error, Debug)]
pub enum ConnectionError {
    #[error("Connection resolved without a request context")]
    MissingRequestContext,
    #[error("Cursor passed as `{0}` was not issued for the requested ordering")]
    CursorOrdering(&'static str),
    #[error("Malformed cursor passed as `{0}`: {1}")]
    MalformedCursor(&'static str, CursorError),
    #[error("`{0}` must not be negative")]
    NegativeCount(&'static str),
    #[error("`{argument}` exceeds the maximum page size of {max}")]
    PageSizeExceeded { argument: &'static str, max: u64 },
    #[error("Unknown ordering {0}")]
    UnknownOrdering(String),
    #[error("Failed to get argument {0}")]
    Argument(String),
    #[error("Failed to downcast parent value to {0}")]
    Parent(&'static str),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error(transparent)]
    Paginator(#[from] PaginatorError),
}
