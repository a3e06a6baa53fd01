use super::build_context::*;
use super::cursor::*;
use super::error::*;
use super::output::*;
use super::resolver::*;
use super::resolver_context::*;
use super::self_prelude::*;

/// Derives the base condition of a connection from its parent value, which
/// is `None` at the root or when the parent is not a JSON value.
pub type GetCondition = Arc<dyn Fn(Option<&Value>) -> Condition + Send + Sync>;

/// Per-field options for [`BuildContext::connection_field`].
#[derive(Clone, Default)]
pub struct ConnectionFieldConfig {
    /// Adds one nullable equality argument per field of the paginator's
    /// object type.
    pub with_fields_condition: bool,
    pub get_condition: Option<GetCondition>,
}

impl ConnectionFieldConfig {
    pub fn with_fields_condition(mut self) -> Self {
        self.with_fields_condition = true;
        self
    }

    pub fn get_condition(
        mut self,
        get_condition: impl Fn(Option<&Value>) -> Condition + Send + Sync + 'static,
    ) -> Self {
        self.get_condition = Some(Arc::new(get_condition));
        self
    }
}

impl fmt::Debug for ConnectionFieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionFieldConfig")
            .field("with_fields_condition", &self.with_fields_condition)
            .field("get_condition", &self.get_condition.is_some())
            .finish()
    }
}

/// An equality argument on a connection field.
#[derive(Clone, Debug)]
pub struct FieldCondition {
    pub argument: String,
    /// Internal name of the field the argument filters on.
    pub field: String,
    pub r#type: Type,
    pub input: TypeRef,
}

/// Turns the arguments of one connection field into a page request.
pub struct ConnectionFieldResolver {
    pub paginator: PaginatorHandle,
    pub order_by: Option<Arc<OrderByType>>,
    pub field_conditions: Vec<FieldCondition>,
    pub get_condition: Option<GetCondition>,
    pub malformed_cursor: MalformedCursorPolicy,
    pub max_page_size: Option<u64>,
}

impl ConnectionFieldResolver {
    pub async fn resolve(&self, ctx: &ResolverContext<'_>) -> ConnectionResult<ConnectionValue> {
        let request = ctx.request_context()?;

        let ordering = self.ordering(ctx)?;
        let before_cursor = self.cursor(ctx, "before", ordering.as_ref())?;
        let after_cursor = self.cursor(ctx, "after", ordering.as_ref())?;
        let condition = self.condition(ctx)?;

        let first = self.count(ctx, "first")?;
        let last = self.count(ctx, "last")?;
        let first = match (first, last) {
            (None, None) => self.max_page_size,
            _ => first,
        };

        let config = PageConfig {
            ordering,
            before_cursor,
            after_cursor,
            first,
            last,
            condition,
        };
        debug!(
            "Request {}: reading page of {} with {:?}",
            request.id(),
            self.paginator.name(),
            config
        );

        let page = self.paginator.read_page(request, &config).await?;
        debug!(
            "Request {}: read {} {} values",
            request.id(),
            page.values().len(),
            self.paginator.name()
        );

        let PageConfig {
            ordering,
            condition,
            ..
        } = config;
        Ok(ConnectionValue {
            paginator: self.paginator.clone(),
            ordering,
            condition: Arc::new(condition),
            page: Arc::new(page),
        })
    }

    fn ordering(&self, ctx: &ResolverContext<'_>) -> ConnectionResult<Option<Ordering>> {
        let (Some(order_by), Some(arg)) = (&self.order_by, ctx.get_arg("orderBy")) else {
            return Ok(self.paginator.default_ordering().cloned());
        };
        let item = match arg.as_value() {
            ConstValue::Enum(item) => item.as_str(),
            ConstValue::String(item) => item.as_str(),
            _ => return Err(ConnectionError::Argument("orderBy".to_string())),
        };
        order_by
            .ordering(item)
            .cloned()
            .map(Some)
            .ok_or_else(|| ConnectionError::UnknownOrdering(item.to_string()))
    }

    /// Decodes a cursor argument, which must be namespaced to `ordering`.
    fn cursor(
        &self,
        ctx: &ResolverContext<'_>,
        argument: &'static str,
        ordering: Option<&Ordering>,
    ) -> ConnectionResult<Option<Cursor>> {
        let Some(text) = ctx.get_arg_string(argument)? else {
            return Ok(None);
        };
        let cursor = match deserialize_cursor(text) {
            Ok(cursor) => cursor,
            Err(e) => match self.malformed_cursor {
                MalformedCursorPolicy::Reject => {
                    return Err(ConnectionError::MalformedCursor(argument, e))
                }
                MalformedCursorPolicy::Ignore => {
                    warn!(
                        "Ignoring malformed `{argument}` cursor for {}: {e}",
                        self.paginator.name()
                    );
                    return Ok(None);
                }
            },
        };
        if cursor.ordering_name.as_deref() != ordering.map(Ordering::name) {
            return Err(ConnectionError::CursorOrdering(argument));
        }
        Ok(Some(cursor.cursor))
    }

    /// The base condition and one equality per field argument present. An
    /// explicit `null` argument filters on `null`.
    fn condition(&self, ctx: &ResolverContext<'_>) -> ConnectionResult<Condition> {
        let base = match &self.get_condition {
            Some(get_condition) => {
                get_condition(ctx.parent_value.try_downcast_ref::<Value>().ok())
            }
            None => Condition::True,
        };
        let equalities = self
            .field_conditions
            .iter()
            .filter_map(|condition| {
                ctx.args.get(&condition.argument).map(|arg| {
                    transform_input_value(&condition.r#type, arg.as_value().clone())
                        .map(|value| Condition::field_equals(&condition.field, value))
                })
            })
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(Condition::and(std::iter::once(base).chain(equalities)))
    }

    fn count(
        &self,
        ctx: &ResolverContext<'_>,
        argument: &'static str,
    ) -> ConnectionResult<Option<u64>> {
        let Some(count) = ctx.get_arg_i64(argument)? else {
            return Ok(None);
        };
        let count = u64::try_from(count).map_err(|_| ConnectionError::NegativeCount(argument))?;
        match self.max_page_size {
            Some(max) if count > max => Err(ConnectionError::PageSizeExceeded { argument, max }),
            _ => Ok(Some(count)),
        }
    }
}
