use super::named::*;
use super::self_prelude::*;

/// Gives a named type another name. An `email` type could be declared as
/// `NamedType::alias("email", NamedType::string())`.
///
/// Only named types can be aliased, since API surfaces such as GraphQL
/// have no way to alias an unnamed type.
#[derive(Clone, Debug)]
pub struct AliasType {
    name: String,
    base: NamedType,
}

impl AliasType {
    pub fn new(name: impl Into<String>, base: NamedType) -> Self {
        Self {
            name: name.into(),
            base,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_type(&self) -> &NamedType {
        &self.base
    }

    pub fn is_member_of(&self, value: &Value) -> bool {
        self.base.is_member_of(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectType, Type};
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn alias_keeps_base_membership() {
        let bases = [
            NamedType::string(),
            NamedType::int(),
            NamedType::enumeration("color", ["red", "blue"]),
            NamedType::object(ObjectType::new("point").field("x", NamedType::float())),
        ];
        let values = [
            json!(null),
            json!("red"),
            json!(3),
            json!({ "x": 1.0 }),
            json!({ "y": 1.0 }),
            json!([]),
        ];
        for base in bases {
            let alias = AliasType::new("renamed", base.clone());
            for value in &values {
                assert_eq!(alias.is_member_of(value), base.is_member_of(value));
            }
        }
    }

    #[test]
    fn alias_is_named_and_exposes_base() {
        let email = NamedType::alias("email", NamedType::string());
        assert_eq!(email.name(), "email");
        assert_matches!(email.kind(), NamedKind::Scalar(scalar) if scalar.name() == "String");
        assert!(!email.is_builtin());

        let nullable = Type::nullable(email);
        assert_eq!(nullable.named_type().unwrap().name(), "email");
        assert_matches!(
            nullable.named_type().unwrap(),
            NamedType::Alias(alias) if alias.base_type().name() == "String"
        );
    }
}
