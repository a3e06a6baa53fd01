//! `async_graphql::dynamic` extensions for handling GraphQL connections.
//! See: https://graphql.org/learn/pagination/#end-of-list-counts-and-connections
//! See: https://relay.dev/graphql/connections.htm#sec-Connection-Types

use super::paging::*;
use super::self_prelude::*;

#[extension_trait]
pub impl ConnectionTypeRef for TypeRef {
    fn connection(name: impl Into<String>) -> String {
        format!("{}Connection", name.into())
    }
    fn connection_edge(name: impl Into<String>) -> String {
        format!("{}Edge", name.into())
    }
}

#[extension_trait]
pub impl ConnectionObject for Object {
    /// `node` is the type of a single connection node, nullability included.
    fn new_connection<Resolver: ConnectionResolver>(
        name: impl Into<String>,
        node: TypeRef,
    ) -> Self {
        let name = name.into();
        Self::new(TypeRef::connection(&name))
            .field(Field::new(
                "pageInfo",
                TypeRef::named_nn(TypeRef::PAGE_INFO),
                Resolver::resolve_page_info,
            ))
            .field(Field::new(
                "totalCount",
                TypeRef::named(TypeRef::INT),
                Resolver::resolve_total_count,
            ))
            .field(Field::new(
                "edges",
                TypeRef::named_nn_list_nn(TypeRef::connection_edge(&name)),
                Resolver::resolve_edges,
            ))
            .field(Field::new(
                "nodes",
                TypeRef::NonNull(Box::new(TypeRef::List(Box::new(node)))),
                Resolver::resolve_nodes,
            ))
    }
}

pub trait ConnectionResolver: Send + Sync + 'static {
    fn resolve_total_count(ctx: ResolverContext) -> FieldFuture;
    fn resolve_nodes(ctx: ResolverContext) -> FieldFuture;
    fn resolve_edges(ctx: ResolverContext) -> FieldFuture;
    fn resolve_page_info(ctx: ResolverContext) -> FieldFuture;
}

#[extension_trait]
pub impl ConnectionEdgeObject for Object {
    fn new_connection_edge<Resolver: ConnectionEdgeResolver>(
        name: impl Into<String>,
        node: TypeRef,
    ) -> Self {
        Self::new(TypeRef::connection_edge(name))
            .field(Field::new(
                "cursor",
                TypeRef::named_nn(TypeRef::CURSOR),
                Resolver::resolve_cursor,
            ))
            .field(Field::new("node", node, Resolver::resolve_node))
    }
}

pub trait ConnectionEdgeResolver: Send + Sync + 'static {
    fn resolve_node(ctx: ResolverContext) -> FieldFuture;
    fn resolve_cursor(ctx: ResolverContext) -> FieldFuture;
}

#[extension_trait]
pub impl ConnectionField for Field {
    /// Add connection arguments to a field.
    /// See: https://relay.dev/graphql/connections.htm#sec-Arguments
    fn connection_arguments(self) -> Self {
        self.pagination_arguments()
    }
}
