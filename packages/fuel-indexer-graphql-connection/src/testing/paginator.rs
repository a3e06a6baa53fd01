use super::self_prelude::*;
use parking_lot::Mutex;
use std::cmp::Ordering as CmpOrdering;

/// Orders values by one of their fields. Ties keep insertion order.
#[derive(Clone, Debug)]
pub struct FieldOrdering {
    ordering: Ordering,
    field: String,
    descending: bool,
}

impl FieldOrdering {
    pub fn ascending(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            ordering: Ordering::new(name),
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            descending: true,
            ..Self::ascending(name, field)
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> CmpOrdering {
        let null = Value::Null;
        let order = compare_values(
            a.get(&self.field).unwrap_or(&null),
            b.get(&self.field).unwrap_or(&null),
        );
        if self.descending {
            order.reverse()
        } else {
            order
        }
    }
}

/// Nulls first, then booleans, numbers and strings; anything else compares
/// by its JSON text.
fn compare_values(a: &Value, b: &Value) -> CmpOrdering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(CmpOrdering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(_), _) | (Value::Object(_), _) if rank(a) == rank(b) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

/// A paginator over a fixed list of values.
///
/// Cursors are the position of a value in the list it was created with,
/// so a cursor stays valid under any condition. `before`/`after` are
/// exclusive, `first` is applied before `last`, and the page flags report
/// whether matching values exist outside the returned window.
pub struct MemoryPaginator {
    name: String,
    r#type: Type,
    values: Vec<Value>,
    field_orderings: Vec<FieldOrdering>,
    orderings: Vec<Ordering>,
    default_ordering: Option<Ordering>,
    reads: Mutex<Vec<PageConfig>>,
    counts: Mutex<Vec<Condition>>,
}

impl MemoryPaginator {
    pub fn new(name: impl Into<String>, r#type: Type, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            r#type,
            values,
            field_orderings: Vec::new(),
            orderings: Vec::new(),
            default_ordering: None,
            reads: Mutex::new(Vec::new()),
            counts: Mutex::new(Vec::new()),
        }
    }

    /// Declares an ordering. The first one declared is the default unless
    /// [`MemoryPaginator::default_ordering`] says otherwise.
    pub fn ordering(mut self, ordering: FieldOrdering) -> Self {
        if self.default_ordering.is_none() {
            self.default_ordering = Some(ordering.ordering.clone());
        }
        self.orderings.push(ordering.ordering.clone());
        self.field_orderings.push(ordering);
        self
    }

    pub fn default_ordering(mut self, ordering: Ordering) -> Self {
        self.default_ordering = Some(ordering);
        self
    }

    /// Every page request received so far.
    pub fn reads(&self) -> Vec<PageConfig> {
        self.reads.lock().clone()
    }

    /// Every count condition received so far.
    pub fn counts(&self) -> Vec<Condition> {
        self.counts.lock().clone()
    }

    fn position(&self, cursor: &Cursor) -> PaginatorResult<usize> {
        cursor
            .as_u64()
            .and_then(|position| usize::try_from(position).ok())
            .filter(|position| *position < self.values.len())
            .ok_or_else(|| anyhow!("Invalid {} cursor {}", self.name, cursor).into())
    }

    /// Matching value positions in the requested order.
    fn sorted(&self, config: &PageConfig) -> PaginatorResult<Vec<usize>> {
        let mut positions = (0..self.values.len())
            .filter(|position| config.condition.matches(&self.values[*position]))
            .collect::<Vec<_>>();
        if let Some(ordering) = &config.ordering {
            let ordering = self
                .field_orderings
                .iter()
                .find(|field_ordering| field_ordering.ordering == *ordering)
                .ok_or_else(|| anyhow!("Unknown {} ordering {}", self.name, ordering))?;
            positions.sort_by(|a, b| ordering.compare(&self.values[*a], &self.values[*b]));
        }
        Ok(positions)
    }
}

#[async_trait]
impl Paginator for MemoryPaginator {
    fn name(&self) -> &str {
        &self.name
    }
    fn r#type(&self) -> &Type {
        &self.r#type
    }
    fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }
    fn default_ordering(&self) -> Option<&Ordering> {
        self.default_ordering.as_ref()
    }

    async fn read_page(
        &self,
        _ctx: &RequestContext,
        config: &PageConfig,
    ) -> PaginatorResult<Page> {
        self.reads.lock().push(config.clone());

        let sorted = self.sorted(config)?;
        // Cursors are positions in `values`; a bound is found by where it
        // sits in the sorted order, which also works for values filtered out.
        let rank = |position: usize| {
            sorted
                .iter()
                .position(|p| *p == position)
                .map(|index| (index, true))
                .unwrap_or_else(|| {
                    let index = sorted
                        .iter()
                        .position(|p| self.compare_to(config, *p, position).is_gt())
                        .unwrap_or(sorted.len());
                    (index, false)
                })
        };

        let mut start = 0;
        let mut end = sorted.len();
        if let Some(after) = &config.after_cursor {
            let (index, found) = rank(self.position(after)?);
            start = start.max(if found { index + 1 } else { index });
        }
        if let Some(before) = &config.before_cursor {
            let (index, _) = rank(self.position(before)?);
            end = end.min(index);
        }
        end = end.max(start);
        if let Some(first) = config.first {
            end = end.min(start.saturating_add(usize::try_from(first).unwrap_or(usize::MAX)));
        }
        if let Some(last) = config.last {
            start = start.max(end.saturating_sub(usize::try_from(last).unwrap_or(usize::MAX)));
        }

        let values = sorted[start..end]
            .iter()
            .map(|position| PageEntry::new(json!(position), self.values[*position].clone()))
            .collect();
        Ok(Page::new(values, end < sorted.len(), start > 0))
    }

    async fn count(&self, _ctx: &RequestContext, condition: &Condition) -> PaginatorResult<u64> {
        self.counts.lock().push(condition.clone());
        let count = self
            .values
            .iter()
            .filter(|value| condition.matches(value))
            .count();
        Ok(count as u64)
    }
}

impl MemoryPaginator {
    /// Compares two positions under the requested ordering, ties broken by
    /// position.
    fn compare_to(&self, config: &PageConfig, a: usize, b: usize) -> CmpOrdering {
        let by_field = config
            .ordering
            .as_ref()
            .and_then(|ordering| {
                self.field_orderings
                    .iter()
                    .find(|field_ordering| field_ordering.ordering == *ordering)
            })
            .map_or(CmpOrdering::Equal, |ordering| {
                ordering.compare(&self.values[a], &self.values[b])
            });
        by_field.then(a.cmp(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator() -> MemoryPaginator {
        let values = (0..10).map(|n| json!({ "n": n, "even": n % 2 == 0 })).collect();
        let ty = NamedType::object(
            ObjectType::new("number")
                .field("n", NamedType::int())
                .field("even", NamedType::boolean()),
        );
        MemoryPaginator::new("number", Type::from(ty), values)
            .ordering(FieldOrdering::ascending("n_asc", "n"))
            .ordering(FieldOrdering::descending("n_desc", "n"))
    }

    fn config(ordering: &str) -> PageConfig {
        PageConfig {
            ordering: Some(Ordering::new(ordering)),
            before_cursor: None,
            after_cursor: None,
            first: None,
            last: None,
            condition: Condition::True,
        }
    }

    fn ns(page: &Page) -> Vec<i64> {
        page.values()
            .iter()
            .map(|entry| entry.value["n"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn first_and_after() {
        let paginator = paginator();
        let ctx = RequestContext::new();
        let page = paginator
            .read_page(
                &ctx,
                &PageConfig {
                    first: Some(3),
                    after_cursor: Some(json!(2)),
                    ..config("n_asc")
                },
            )
            .await
            .unwrap();
        assert_eq!(ns(&page), [3, 4, 5]);
        assert!(page.has_next_page());
        assert!(page.has_previous_page());
        assert_eq!(page.first().unwrap().cursor, json!(3));
    }

    #[tokio::test]
    async fn last_and_before_descending() {
        let paginator = paginator();
        let ctx = RequestContext::new();
        let page = paginator
            .read_page(
                &ctx,
                &PageConfig {
                    last: Some(2),
                    before_cursor: Some(json!(6)),
                    ..config("n_desc")
                },
            )
            .await
            .unwrap();
        assert_eq!(ns(&page), [8, 7]);
        assert!(page.has_next_page());
        assert!(page.has_previous_page());
    }

    #[tokio::test]
    async fn bounds_on_filtered_out_values() {
        let paginator = paginator();
        let ctx = RequestContext::new();
        let page = paginator
            .read_page(
                &ctx,
                &PageConfig {
                    after_cursor: Some(json!(3)),
                    condition: Condition::field_equals("even", true),
                    ..config("n_asc")
                },
            )
            .await
            .unwrap();
        assert_eq!(ns(&page), [4, 6, 8]);
        assert!(!page.has_next_page());
        assert!(page.has_previous_page());
    }

    #[tokio::test]
    async fn empty_window() {
        let paginator = paginator();
        let ctx = RequestContext::new();
        let page = paginator
            .read_page(
                &ctx,
                &PageConfig {
                    after_cursor: Some(json!(5)),
                    before_cursor: Some(json!(4)),
                    ..config("n_asc")
                },
            )
            .await
            .unwrap();
        assert!(page.values().is_empty());
        assert!(page.first().is_none());
    }

    #[tokio::test]
    async fn rejects_foreign_cursors() {
        let paginator = paginator();
        let ctx = RequestContext::new();
        let result = paginator
            .read_page(
                &ctx,
                &PageConfig {
                    after_cursor: Some(json!("x")),
                    ..config("n_asc")
                },
            )
            .await;
        assert!(result.is_err());
        assert_eq!(paginator.reads().len(), 1);
    }

    #[tokio::test]
    async fn counts_matching_values() {
        let paginator = paginator();
        let ctx = RequestContext::new();
        let count = paginator
            .count(&ctx, &Condition::field_equals("even", false))
            .await
            .unwrap();
        assert_eq!(count, 5);
        assert_eq!(paginator.counts(), [Condition::field_equals("even", false)]);
    }
}
