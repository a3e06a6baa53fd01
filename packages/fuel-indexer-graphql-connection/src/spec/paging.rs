//! Cursor scalar, pagination arguments and `PageInfo`.
//! See: https://relay.dev/graphql/connections.htm#sec-Arguments

use super::self_prelude::*;

#[extension_trait]
pub impl PagingTypeRef for TypeRef {
    const CURSOR: &'static str = "Cursor";
    const PAGE_INFO: &'static str = "PageInfo";
}

#[extension_trait]
pub impl CursorScalar for Scalar {
    /// Cursors are opaque strings to clients.
    fn new_cursor() -> Self {
        Self::new(TypeRef::CURSOR)
            .description("An opaque position in a connection.")
            .validator(|value| matches!(value, ConstValue::String(_)))
    }
}

#[extension_trait]
pub impl PagingField for Field {
    fn pagination_arguments(self) -> Self {
        self.forward_pagination_arguments()
            .backward_pagination_arguments()
    }
    /// Add `first` and `after`.
    /// See: https://relay.dev/graphql/connections.htm#sec-Forward-pagination-arguments
    fn forward_pagination_arguments(self) -> Self {
        self.argument(
            InputValue::new("first", TypeRef::named(TypeRef::INT)).description(
                "Return at most this many edges from the start of the window.",
            ),
        )
        .argument(
            InputValue::new("after", TypeRef::named(TypeRef::CURSOR))
                .description("Only return edges after this cursor."),
        )
    }
    /// Add `last` and `before`.
    /// See: https://relay.dev/graphql/connections.htm#sec-Backward-pagination-arguments
    fn backward_pagination_arguments(self) -> Self {
        self.argument(
            InputValue::new("last", TypeRef::named(TypeRef::INT)).description(
                "Return at most this many edges from the end of the window.",
            ),
        )
        .argument(
            InputValue::new("before", TypeRef::named(TypeRef::CURSOR))
                .description("Only return edges before this cursor."),
        )
    }
}

/// See: https://relay.dev/graphql/connections.htm#sec-PageInfo
#[extension_trait]
pub impl PageInfoObject for Object {
    /// The cursors are null on an empty page.
    fn new_page_info<Resolver: PageInfoResolver>() -> Self {
        Self::new(TypeRef::PAGE_INFO)
            .field(Field::new(
                "hasNextPage",
                TypeRef::named_nn(TypeRef::BOOLEAN),
                Resolver::resolve_has_next_page,
            ))
            .field(Field::new(
                "hasPreviousPage",
                TypeRef::named_nn(TypeRef::BOOLEAN),
                Resolver::resolve_has_previous_page,
            ))
            .field(Field::new(
                "startCursor",
                TypeRef::named(TypeRef::CURSOR),
                Resolver::resolve_start_cursor,
            ))
            .field(Field::new(
                "endCursor",
                TypeRef::named(TypeRef::CURSOR),
                Resolver::resolve_end_cursor,
            ))
    }
}

pub trait PageInfoResolver: Send + Sync + 'static {
    fn resolve_has_next_page(ctx: ResolverContext) -> FieldFuture;
    fn resolve_has_previous_page(ctx: ResolverContext) -> FieldFuture;
    fn resolve_start_cursor(ctx: ResolverContext) -> FieldFuture;
    fn resolve_end_cursor(ctx: ResolverContext) -> FieldFuture;
}
