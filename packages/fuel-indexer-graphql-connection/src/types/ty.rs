use super::named::*;
use super::self_prelude::*;

/// A type descriptor. Types are non-nullable unless wrapped in
/// [`Type::Nullable`].
#[derive(Clone, Debug)]
pub enum Type {
    /// An unnamed list of some item type.
    List(Arc<Type>),
    Named(NamedType),
    /// The domain of the wrapped type plus `null`.
    Nullable(Arc<Type>),
}

pub type TypeResult<T> = Result<T, TypeError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("No named type is reachable from `{0}` through nullable wrappers")]
    Unnamed(String),
}

impl Type {
    pub fn list(item: impl Into<Type>) -> Self {
        Self::List(Arc::new(item.into()))
    }

    /// Wraps a type so its domain includes `null`. Wrapping an already
    /// nullable type returns it unchanged.
    pub fn nullable(of: impl Into<Type>) -> Self {
        match of.into() {
            of @ Self::Nullable(_) => of,
            of => Self::Nullable(Arc::new(of)),
        }
    }

    pub fn is_member_of(&self, value: &Value) -> bool {
        match self {
            Self::Nullable(of) => value.is_null() || of.is_member_of(value),
            Self::List(item) => value
                .as_array()
                .map_or(false, |items| items.iter().all(|v| item.is_member_of(v))),
            Self::Named(named) => named.is_member_of(value),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Strips every nullable wrapper from the type.
    pub fn non_null_type(&self) -> &Type {
        match self {
            Self::Nullable(of) => of.non_null_type(),
            ty => ty,
        }
    }

    /// Walks through nullable wrappers, and only nullable wrappers, to the
    /// nearest named type.
    pub fn named_type(&self) -> TypeResult<&NamedType> {
        match self {
            Self::Named(named) => Ok(named),
            Self::Nullable(of) => of.named_type(),
            Self::List(_) => Err(TypeError::Unnamed(self.to_string())),
        }
    }
}

impl From<NamedType> for Type {
    fn from(named: NamedType) -> Self {
        Self::Named(named)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable(of) => match of.as_ref() {
                Self::Nullable(inner) => write!(f, "{}", Self::Nullable(inner.clone())),
                Self::List(item) => write!(f, "[{}]", item),
                Self::Named(named) => write!(f, "{}", named.name()),
            },
            Self::List(item) => write!(f, "[{}]!", item),
            Self::Named(named) => write!(f, "{}!", named.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn samples() -> Vec<Value> {
        vec![
            json!(null),
            json!(true),
            json!(7),
            json!(-3),
            json!(4_294_967_296u64),
            json!(1.5),
            json!("hello"),
            json!([1, 2]),
            json!({ "id": "a" }),
        ]
    }

    #[test]
    fn nullable_admits_null_and_inner_domain() {
        let int = Type::from(NamedType::int());
        let nullable = Type::nullable(int.clone());
        assert!(nullable.is_member_of(&json!(null)));
        assert!(!int.is_member_of(&json!(null)));
        for value in samples().iter().filter(|v| !v.is_null()) {
            assert_eq!(nullable.is_member_of(value), int.is_member_of(value));
        }
    }

    #[test]
    fn nullable_does_not_nest() {
        let ty = Type::nullable(Type::nullable(NamedType::string()));
        assert_matches!(&ty, Type::Nullable(of) if !of.is_nullable());
        assert_eq!(ty.to_string(), "String");
    }

    #[test]
    fn named_type_walks_nullable_wrappers_only() {
        let ty = Type::nullable(NamedType::boolean());
        assert_eq!(ty.named_type().unwrap().name(), "Boolean");

        let list = Type::nullable(Type::list(NamedType::boolean()));
        assert_matches!(list.named_type(), Err(TypeError::Unnamed(name)) if name == "[Boolean!]!");
    }

    #[test]
    fn non_null_type_unwraps() {
        let ty = Type::nullable(Type::list(NamedType::float()));
        assert_matches!(ty.non_null_type(), Type::List(_));
    }

    #[test]
    fn lists_check_every_item() {
        let ty = Type::list(NamedType::int());
        assert!(ty.is_member_of(&json!([1, 2, 3])));
        assert!(ty.is_member_of(&json!([])));
        assert!(!ty.is_member_of(&json!([1, "2"])));
        assert!(!ty.is_member_of(&json!(1)));
    }
}
