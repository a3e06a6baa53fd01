use super::cursor::*;
use super::output::*;
use super::resolver_context::*;
use super::self_prelude::*;

/// The parent value of a connection and its page info.
#[derive(Clone)]
pub struct ConnectionValue {
    pub paginator: PaginatorHandle,
    pub ordering: Option<Ordering>,
    /// The effective condition the page was read with. `totalCount` counts
    /// under the same condition.
    pub condition: Arc<Condition>,
    pub page: Arc<Page>,
}

impl ConnectionValue {
    fn cursor(&self, entry: &PageEntry) -> CursorResult<String> {
        serialize_cursor(&NamespacedCursor::new(
            self.ordering.as_ref(),
            entry.cursor.clone(),
        ))
    }

    fn edges(&self) -> impl Iterator<Item = EdgeValue> + '_ {
        self.page.values().iter().map(|entry| EdgeValue {
            paginator: self.paginator.clone(),
            ordering: self.ordering.clone(),
            cursor: entry.cursor.clone(),
            value: entry.value.clone(),
        })
    }
}

/// The parent value of a connection edge.
#[derive(Clone)]
pub struct EdgeValue {
    pub paginator: PaginatorHandle,
    pub ordering: Option<Ordering>,
    pub cursor: Cursor,
    pub value: Value,
}

/// Resolves the generated connection, edge and page info types from their
/// parent values.
pub struct PaginatedResolver;

impl ConnectionResolver for PaginatedResolver {
    fn resolve_total_count(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            let request = ctx.request_context()?;
            debug!(
                "Request {}: counting {} with {:?}",
                request.id(),
                connection.paginator.name(),
                connection.condition
            );
            let count = connection
                .paginator
                .count(request, &connection.condition)
                .await?;
            Ok(Some(FieldValue::value(ConstValue::Number(count.into()))))
        })
    }
    fn resolve_nodes(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            let ty = connection.paginator.r#type();
            let nodes = connection
                .page
                .values()
                .iter()
                .map(|entry| output_value(ty, entry.value.clone()))
                .collect::<ValueResult<Vec<_>>>()?;
            Ok(Some(FieldValue::list(nodes)))
        })
    }
    fn resolve_edges(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            Ok(Some(FieldValue::list(
                connection.edges().map(FieldValue::owned_any),
            )))
        })
    }
    fn resolve_page_info(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            Ok(Some(FieldValue::owned_any(connection.clone())))
        })
    }
}

impl ConnectionEdgeResolver for PaginatedResolver {
    fn resolve_node(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let edge = ctx.parent::<EdgeValue>()?;
            Ok(Some(output_value(
                edge.paginator.r#type(),
                edge.value.clone(),
            )?))
        })
    }
    fn resolve_cursor(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let edge = ctx.parent::<EdgeValue>()?;
            let cursor = serialize_cursor(&NamespacedCursor::new(
                edge.ordering.as_ref(),
                edge.cursor.clone(),
            ))?;
            Ok(Some(FieldValue::value(cursor)))
        })
    }
}

impl PageInfoResolver for PaginatedResolver {
    fn resolve_has_next_page(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            Ok(Some(FieldValue::value(connection.page.has_next_page())))
        })
    }
    fn resolve_has_previous_page(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            Ok(Some(FieldValue::value(connection.page.has_previous_page())))
        })
    }
    fn resolve_start_cursor(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            match connection.page.first() {
                Some(entry) => Ok(Some(FieldValue::value(connection.cursor(entry)?))),
                None => Ok(None),
            }
        })
    }
    fn resolve_end_cursor(ctx: ResolverContext) -> FieldFuture {
        FieldFuture::new(async move {
            let connection = ctx.parent::<ConnectionValue>()?;
            match connection.page.last() {
                Some(entry) => Ok(Some(FieldValue::value(connection.cursor(entry)?))),
                None => Ok(None),
            }
        })
    }
}
