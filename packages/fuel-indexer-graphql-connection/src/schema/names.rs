//! GraphQL naming for internal names.

use convert_case::{Case, Casing};

/// `post_tag` becomes `PostTag`.
pub fn type_name(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// `author_id` becomes `authorId`.
pub fn field_name(name: &str) -> String {
    name.to_case(Case::Camel)
}

/// `index_asc` becomes `INDEX_ASC`.
pub fn enum_item_name(name: &str) -> String {
    name.to_case(Case::UpperSnake)
}
