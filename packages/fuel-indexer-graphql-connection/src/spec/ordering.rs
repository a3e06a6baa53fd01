//! `async_graphql::dynamic` extensions for declarative connection ordering.

use super::self_prelude::*;

#[extension_trait]
pub impl OrderByTypeRef for TypeRef {
    fn order_by(name: impl Into<String>) -> String {
        format!("{}OrderBy", name.into())
    }
}

#[extension_trait]
pub impl OrderByEnum for Enum {
    fn new_order_by<S: Into<String>>(
        name: impl Into<String>,
        items: impl IntoIterator<Item = S>,
    ) -> Self {
        items
            .into_iter()
            .fold(Self::new(TypeRef::order_by(name)), |r#enum, item| {
                r#enum.item(EnumItem::new(item.into()))
            })
    }
}

#[extension_trait]
pub impl OrderByField for Field {
    /// Add the `orderBy` argument. Without a default the argument is left
    /// unset and the paginator picks.
    fn order_by_argument(
        self,
        enum_name: impl Into<String>,
        default_item: Option<String>,
    ) -> Self {
        let mut argument = InputValue::new("orderBy", TypeRef::named(enum_name.into()))
            .description("The order of the connection's edges.");
        if let Some(item) = default_item {
            argument = argument.default_value(ConstValue::Enum(Name::new(item)));
        }
        self.argument(argument)
    }
}
