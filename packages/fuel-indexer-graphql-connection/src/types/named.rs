use super::alias::*;
use super::self_prelude::*;
use super::ty::*;

/// A type carrying a name unique within one schema build. Only named types
/// can be aliased or exposed as standalone API types.
#[derive(Clone, Debug)]
pub enum NamedType {
    Scalar(Arc<ScalarType>),
    Enum(Arc<EnumType>),
    Object(Arc<ObjectType>),
    Alias(Arc<AliasType>),
}

/// The underlying shape of a named type once aliases are looked through.
#[derive(Clone, Copy, Debug)]
pub enum NamedKind<'a> {
    Scalar(&'a ScalarType),
    Enum(&'a EnumType),
    Object(&'a ObjectType),
}

impl NamedType {
    pub fn string() -> Self {
        Self::Scalar(Arc::new(ScalarType::builtin("String", ScalarKind::String)))
    }
    pub fn int() -> Self {
        Self::Scalar(Arc::new(ScalarType::builtin("Int", ScalarKind::Int)))
    }
    pub fn float() -> Self {
        Self::Scalar(Arc::new(ScalarType::builtin("Float", ScalarKind::Float)))
    }
    pub fn boolean() -> Self {
        Self::Scalar(Arc::new(ScalarType::builtin("Boolean", ScalarKind::Boolean)))
    }
    pub fn id() -> Self {
        Self::Scalar(Arc::new(ScalarType::builtin("ID", ScalarKind::Id)))
    }
    pub fn custom_scalar(
        name: impl Into<String>,
        is_member_of: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Scalar(Arc::new(ScalarType {
            name: name.into(),
            kind: ScalarKind::Custom(Arc::new(is_member_of)),
        }))
    }
    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::Enum(Arc::new(EnumType::new(name, variants)))
    }
    pub fn object(object: ObjectType) -> Self {
        Self::Object(Arc::new(object))
    }
    pub fn alias(name: impl Into<String>, base: NamedType) -> Self {
        Self::Alias(Arc::new(AliasType::new(name, base)))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(scalar) => &scalar.name,
            Self::Enum(r#enum) => &r#enum.name,
            Self::Object(object) => &object.name,
            Self::Alias(alias) => alias.name(),
        }
    }

    pub fn is_member_of(&self, value: &Value) -> bool {
        match self {
            Self::Scalar(scalar) => scalar.is_member_of(value),
            Self::Enum(r#enum) => r#enum.is_member_of(value),
            Self::Object(object) => object.is_member_of(value),
            Self::Alias(alias) => alias.is_member_of(value),
        }
    }

    pub fn kind(&self) -> NamedKind<'_> {
        match self {
            Self::Scalar(scalar) => NamedKind::Scalar(scalar),
            Self::Enum(r#enum) => NamedKind::Enum(r#enum),
            Self::Object(object) => NamedKind::Object(object),
            Self::Alias(alias) => alias.base_type().kind(),
        }
    }

    /// Built-in scalars map onto the GraphQL scalars of the same name.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Scalar(scalar) if scalar.is_builtin())
    }
}

#[derive(Clone)]
pub enum ScalarKind {
    String,
    /// A 32 bit signed integer.
    Int,
    Float,
    Boolean,
    /// A string or an integer.
    Id,
    Custom(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl fmt::Debug for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Int => write!(f, "Int"),
            Self::Float => write!(f, "Float"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Id => write!(f, "Id"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScalarType {
    name: String,
    kind: ScalarKind,
}

impl ScalarType {
    fn builtin(name: &str, kind: ScalarKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> &ScalarKind {
        &self.kind
    }
    pub fn is_builtin(&self) -> bool {
        !matches!(self.kind, ScalarKind::Custom(_))
    }

    pub fn is_member_of(&self, value: &Value) -> bool {
        match &self.kind {
            ScalarKind::String => value.is_string(),
            ScalarKind::Int => value
                .as_i64()
                .map_or(false, |n| i32::try_from(n).is_ok()),
            ScalarKind::Float => value.is_number(),
            ScalarKind::Boolean => value.is_boolean(),
            ScalarKind::Id => value.is_string() || value.is_i64() || value.is_u64(),
            ScalarKind::Custom(is_member_of) => is_member_of(value),
        }
    }
}

/// An enumeration of string values, in declaration order.
#[derive(Clone, Debug)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for variant in variants.into_iter().map(Into::into) {
            if !unique.contains(&variant) {
                unique.push(variant);
            }
        }
        Self {
            name: name.into(),
            variants: unique,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn is_member_of(&self, value: &Value) -> bool {
        value
            .as_str()
            .map_or(false, |value| self.variants.iter().any(|v| v == value))
    }
}

#[derive(Clone, Debug)]
pub struct ObjectField {
    name: String,
    r#type: Type,
    description: Option<String>,
}

impl ObjectField {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn r#type(&self) -> &Type {
        &self.r#type
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A record of named fields. Membership checks the declared fields only; a
/// missing member is tested as `null`.
#[derive(Clone, Debug)]
pub struct ObjectType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, ObjectField>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: IndexMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(self, name: impl Into<String>, r#type: impl Into<Type>) -> Self {
        self.described_field(name, r#type, None::<String>)
    }

    pub fn described_field(
        mut self,
        name: impl Into<String>,
        r#type: impl Into<Type>,
        description: Option<impl Into<String>>,
    ) -> Self {
        let name = name.into();
        self.fields.insert(
            name.clone(),
            ObjectField {
                name,
                r#type: r#type.into(),
                description: description.map(Into::into),
            },
        );
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn object_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn fields(&self) -> impl Iterator<Item = &ObjectField> {
        self.fields.values()
    }
    pub fn get_field(&self, name: &str) -> Option<&ObjectField> {
        self.fields.get(name)
    }

    pub fn is_member_of(&self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        self.fields.values().all(|field| {
            field
                .r#type
                .is_member_of(object.get(&field.name).unwrap_or(&Value::Null))
        })
    }
}
