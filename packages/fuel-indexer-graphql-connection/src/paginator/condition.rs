use super::self_prelude::*;

/// A boolean filter over values, interpreted by the store.
///
/// Use [`Condition::and`] and [`Condition::or`] rather than the variants
/// directly: they collapse degenerate nodes so stores never see an `and`
/// or `or` with fewer than two children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    True,
    And(Vec<Condition>),
    Or(Vec<Condition>),
    FieldEquals { name: String, value: Value },
}

impl Default for Condition {
    fn default() -> Self {
        Self::True
    }
}

impl Condition {
    /// Conjunction. `True` children are dropped; nothing left is `True` and a
    /// single child is returned as is.
    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let mut conditions = conditions
            .into_iter()
            .filter(|condition| !condition.is_true())
            .collect::<Vec<_>>();
        match conditions.len() {
            0 => Self::True,
            1 => conditions.remove(0),
            _ => Self::And(conditions),
        }
    }

    /// Disjunction. Any `True` child makes the whole disjunction `True`, as
    /// does an empty one; a single child is returned as is.
    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let mut conditions = conditions.into_iter().collect::<Vec<_>>();
        if conditions.iter().any(Self::is_true) {
            return Self::True;
        }
        match conditions.len() {
            0 => Self::True,
            1 => conditions.remove(0),
            _ => Self::Or(conditions),
        }
    }

    pub fn field_equals(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Evaluates the condition against an object value. A missing field
    /// compares as `null`.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::True => true,
            Self::And(conditions) => conditions.iter().all(|c| c.matches(value)),
            Self::Or(conditions) => conditions.iter().any(|c| c.matches(value)),
            Self::FieldEquals {
                name,
                value: expected,
            } => value.get(name).unwrap_or(&Value::Null) == expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eq(name: &str, value: i64) -> Condition {
        Condition::field_equals(name, value)
    }

    #[test]
    fn and_identity() {
        let a = eq("a", 1);
        assert_eq!(Condition::and([a.clone(), Condition::True]), a);
        assert_eq!(Condition::and([Condition::True, a.clone()]), a);
        assert_eq!(Condition::and([Condition::True, Condition::True]), Condition::True);
        assert_eq!(Condition::and(Vec::new()), Condition::True);
    }

    #[test]
    fn and_keeps_real_children_in_order() {
        let condition = Condition::and([eq("a", 1), Condition::True, eq("b", 2)]);
        assert_eq!(condition, Condition::And(vec![eq("a", 1), eq("b", 2)]));
    }

    #[test]
    fn or_collapses() {
        let a = eq("a", 1);
        assert_eq!(Condition::or([a.clone()]), a);
        assert_eq!(Condition::or([Condition::True, Condition::True]), Condition::True);
        assert_eq!(Condition::or([a.clone(), Condition::True]), Condition::True);
        assert_eq!(Condition::or(Vec::new()), Condition::True);
        assert_eq!(
            Condition::or([a.clone(), eq("b", 2)]),
            Condition::Or(vec![a, eq("b", 2)])
        );
    }

    #[test]
    fn matches_objects() {
        let value = json!({ "a": 1, "b": "x", "c": null });
        assert!(eq("a", 1).matches(&value));
        assert!(!eq("a", 2).matches(&value));
        assert!(Condition::field_equals("c", Value::Null).matches(&value));
        assert!(Condition::field_equals("missing", Value::Null).matches(&value));
        assert!(Condition::and([eq("a", 1), Condition::field_equals("b", "x")]).matches(&value));
        assert!(Condition::or([eq("a", 2), Condition::field_equals("b", "x")]).matches(&value));
        assert!(!Condition::Or(vec![eq("a", 2), eq("a", 3)]).matches(&value));
    }

    #[test]
    fn serializes_for_stores() {
        let condition = Condition::and([eq("a", 1), Condition::field_equals("b", "x")]);
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            json,
            json!({ "and": [
                { "field_equals": { "name": "a", "value": 1 } },
                { "field_equals": { "name": "b", "value": "x" } }
            ] })
        );
        let back: Condition = serde_json::from_value(json).unwrap();
        assert_eq!(back, condition);
    }
}
