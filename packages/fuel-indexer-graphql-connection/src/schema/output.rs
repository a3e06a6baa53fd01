//! Mapping of value types onto GraphQL types and values.
//!
//! Named types are registered with the build the first time they are
//! referenced: custom scalars and aliases as `Scalar`s, enums as `Enum`s
//! with CONSTANT_CASE items, and objects as an output `Object` and an
//! input `<Name>Input` object whose fields project the JSON members.

use super::build_context::*;
use super::error::*;
use super::names::*;
use super::resolver_context::*;
use super::self_prelude::*;

pub type ValueResult<T> = Result<T, ValueError>;

#[derive(thiserror::Error, Debug)]
pub enum ValueError {
    #[error("Expected a value of type `{expected}`, found {found}")]
    Unexpected { expected: String, found: String },
    #[error("Unknown item {item} of enum {enum_name}")]
    UnknownEnumItem { enum_name: String, item: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ValueError {
    fn unexpected(expected: &Type, found: impl fmt::Display) -> Self {
        Self::Unexpected {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Non-null type refs for non-null types, with nullable wrappers dropping
/// the outer `!`.
fn type_ref(
    ty: &Type,
    named: &dyn Fn(&NamedType) -> BuildResult<String>,
) -> BuildResult<TypeRef> {
    Ok(match ty {
        Type::Nullable(of) => match type_ref(of, named)? {
            TypeRef::NonNull(inner) => *inner,
            of => of,
        },
        Type::List(item) => {
            TypeRef::NonNull(Box::new(TypeRef::List(Box::new(type_ref(item, named)?))))
        }
        Type::Named(ty) => TypeRef::named_nn(named(ty)?),
    })
}

fn scalar_type(name: &str, named: &NamedType) -> Scalar {
    let named = named.clone();
    Scalar::new(name).validator(move |value| {
        value
            .clone()
            .into_json()
            .map_or(false, |value| named.is_member_of(&value))
    })
}

/// Variants must stay distinct once converted to item names, or input
/// values could not be mapped back.
fn enum_type(name: &str, r#enum: &EnumType) -> BuildResult<Enum> {
    let mut items = HashSet::new();
    let mut dyn_enum = Enum::new(name);
    for variant in r#enum.variants() {
        let item = enum_item_name(variant);
        if !items.insert(item.clone()) {
            return Err(BuildError::DuplicateEnumItem {
                type_name: name.to_string(),
                item,
            });
        }
        dyn_enum = dyn_enum.item(EnumItem::new(item));
    }
    Ok(dyn_enum)
}

impl BuildContext {
    pub fn output_type(&self, ty: &Type) -> BuildResult<TypeRef> {
        type_ref(ty, &|named| self.output_named_type(named))
    }

    pub fn input_type(&self, ty: &Type) -> BuildResult<TypeRef> {
        type_ref(ty, &|named| self.input_named_type(named))
    }

    fn output_named_type(&self, named: &NamedType) -> BuildResult<String> {
        if named.is_builtin() {
            return Ok(named.name().to_string());
        }
        let name = type_name(named.name());
        match named.kind() {
            NamedKind::Scalar(_) => {
                self.register_if_absent(&name, || Ok(scalar_type(&name, named).into()))?
            }
            NamedKind::Enum(r#enum) => {
                self.register_if_absent(&name, || enum_type(&name, r#enum).map(Into::into))?
            }
            NamedKind::Object(object) => self.register_if_absent(&name, || {
                self.output_object(&name, object).map(Into::into)
            })?,
        }
        Ok(name)
    }

    fn input_named_type(&self, named: &NamedType) -> BuildResult<String> {
        match named.kind() {
            NamedKind::Object(object) => {
                let name = format!("{}Input", type_name(named.name()));
                self.register_if_absent(&name, || {
                    self.input_object(&name, object).map(Into::into)
                })?;
                Ok(name)
            }
            _ => self.output_named_type(named),
        }
    }

    fn output_object(&self, name: &str, object: &ObjectType) -> BuildResult<Object> {
        let mut dyn_object = Object::new(name);
        if let Some(description) = object.object_description() {
            dyn_object = dyn_object.description(description);
        }
        for field in object.fields() {
            let member = field.name().to_string();
            let ty = field.r#type().clone();
            let type_ref = self.output_type(&ty)?;
            let mut dyn_field = Field::new(field_name(field.name()), type_ref, move |ctx| {
                let member = member.clone();
                let ty = ty.clone();
                FieldFuture::new(async move {
                    let parent = ctx.parent::<Value>()?;
                    let value = parent.get(&member).cloned().unwrap_or(Value::Null);
                    Ok(Some(output_value(&ty, value)?))
                })
            });
            if let Some(description) = field.description() {
                dyn_field = dyn_field.description(description);
            }
            dyn_object = dyn_object.field(dyn_field);
        }
        Ok(dyn_object)
    }

    fn input_object(&self, name: &str, object: &ObjectType) -> BuildResult<InputObject> {
        let mut input = InputObject::new(name);
        for field in object.fields() {
            let mut value = InputValue::new(field_name(field.name()), self.input_type(field.r#type())?);
            if let Some(description) = field.description() {
                value = value.description(description);
            }
            input = input.field(value);
        }
        Ok(input)
    }
}

/// Converts an internal value into the field value resolvers hand to
/// GraphQL. Object values are passed on as JSON for their field resolvers.
pub fn output_value(ty: &Type, value: Value) -> ValueResult<FieldValue<'static>> {
    match ty {
        Type::Nullable(_) if value.is_null() => Ok(FieldValue::value(ConstValue::Null)),
        Type::Nullable(of) => output_value(of, value),
        _ if value.is_null() => Err(ValueError::unexpected(ty, value)),
        Type::List(item) => match value {
            Value::Array(values) => Ok(FieldValue::list(
                values
                    .into_iter()
                    .map(|value| output_value(item, value))
                    .collect::<ValueResult<Vec<_>>>()?,
            )),
            value => Err(ValueError::unexpected(ty, value)),
        },
        Type::Named(named) => match named.kind() {
            NamedKind::Object(_) => Ok(FieldValue::owned_any(value)),
            NamedKind::Enum(_) => match value {
                Value::String(variant) => Ok(FieldValue::value(ConstValue::Enum(Name::new(
                    enum_item_name(&variant),
                )))),
                value => Err(ValueError::unexpected(ty, value)),
            },
            NamedKind::Scalar(_) => Ok(FieldValue::value(ConstValue::from_json(value)?)),
        },
    }
}

/// Converts a GraphQL input value back into an internal value: enum items
/// become their variant, object keys their internal field name.
pub fn transform_input_value(ty: &Type, value: ConstValue) -> ValueResult<Value> {
    match ty {
        Type::Nullable(_) if value == ConstValue::Null => Ok(Value::Null),
        Type::Nullable(of) => transform_input_value(of, value),
        Type::List(item) => match value {
            ConstValue::List(values) => values
                .into_iter()
                .map(|value| transform_input_value(item, value))
                .collect::<ValueResult<Vec<_>>>()
                .map(Value::Array),
            // Input coercion accepts a single item for a list.
            value => Ok(Value::Array(vec![transform_input_value(item, value)?])),
        },
        Type::Named(named) => match named.kind() {
            NamedKind::Enum(r#enum) => {
                let item = match &value {
                    ConstValue::Enum(item) => item.as_str(),
                    ConstValue::String(item) => item.as_str(),
                    value => return Err(ValueError::unexpected(ty, value)),
                };
                r#enum
                    .variants()
                    .iter()
                    .find(|variant| enum_item_name(variant) == item)
                    .map(|variant| Value::String(variant.clone()))
                    .ok_or_else(|| ValueError::UnknownEnumItem {
                        enum_name: r#enum.name().to_string(),
                        item: item.to_string(),
                    })
            }
            NamedKind::Object(object) => match value {
                ConstValue::Object(members) => {
                    let mut members = members
                        .into_iter()
                        .map(|(name, value)| (name.as_str().to_string(), value))
                        .collect::<HashMap<_, _>>();
                    let mut json = serde_json::Map::new();
                    for field in object.fields() {
                        if let Some(value) = members.remove(&field_name(field.name())) {
                            json.insert(
                                field.name().to_string(),
                                transform_input_value(field.r#type(), value)?,
                            );
                        }
                    }
                    Ok(Value::Object(json))
                }
                value => Err(ValueError::unexpected(ty, value)),
            },
            NamedKind::Scalar(_) => Ok(value.into_json()?),
        },
    }
}
