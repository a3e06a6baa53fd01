use async_graphql::dynamic::Schema;
use fuel_indexer_graphql_connection::testing::prelude::*;
use graphql_parser::schema::{
    parse_schema, Definition, Document, EnumType, ObjectType, TypeDefinition,
};
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, BTreeSet};

fn object<'d, 'a>(document: &'d Document<'a, String>, name: &str) -> &'d ObjectType<'a, String> {
    document
        .definitions
        .iter()
        .find_map(|definition| match definition {
            Definition::TypeDefinition(TypeDefinition::Object(object))
                if object.name == name =>
            {
                Some(object)
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("missing object {name}"))
}

fn enum_type<'d, 'a>(
    document: &'d Document<'a, String>,
    name: &str,
) -> Option<&'d EnumType<'a, String>> {
    document
        .definitions
        .iter()
        .find_map(|definition| match definition {
            Definition::TypeDefinition(TypeDefinition::Enum(r#enum)) if r#enum.name == name => {
                Some(r#enum)
            }
            _ => None,
        })
}

/// Field name to printed type.
fn fields(object: &ObjectType<'_, String>) -> BTreeMap<String, String> {
    object
        .fields
        .iter()
        .map(|field| (field.name.clone(), field.field_type.to_string()))
        .collect()
}

/// Argument name to printed type and default value.
fn arguments(object: &ObjectType<'_, String>, field: &str) -> BTreeMap<String, (String, Option<String>)> {
    object
        .fields
        .iter()
        .find(|f| f.name == field)
        .unwrap_or_else(|| panic!("missing field {field}"))
        .arguments
        .iter()
        .map(|argument| {
            (
                argument.name.clone(),
                (
                    argument.value_type.to_string(),
                    argument.default_value.as_ref().map(ToString::to_string),
                ),
            )
        })
        .collect()
}

fn map<const N: usize>(entries: [(&str, &str); N]) -> BTreeMap<String, String> {
    entries
        .into_iter()
        .map(|(name, ty)| (name.to_string(), ty.to_string()))
        .collect()
}

#[test]
fn test_connection_types() {
    let schema = Schema::build_test().unwrap().finish().unwrap();
    let sdl = schema.sdl();
    let document = parse_schema::<String>(&sdl).unwrap();

    assert_eq!(
        fields(object(&document, "PostConnection")),
        map([
            ("pageInfo", "PageInfo!"),
            ("totalCount", "Int"),
            ("edges", "[PostEdge!]!"),
            ("nodes", "[Post!]!"),
        ])
    );
    assert_eq!(
        fields(object(&document, "PostEdge")),
        map([("cursor", "Cursor!"), ("node", "Post!")])
    );
    assert_eq!(
        fields(object(&document, "PageInfo")),
        map([
            ("hasNextPage", "Boolean!"),
            ("hasPreviousPage", "Boolean!"),
            ("startCursor", "Cursor"),
            ("endCursor", "Cursor"),
        ])
    );
    assert_eq!(
        fields(object(&document, "Post")),
        map([
            ("index", "Int!"),
            ("id", "ID!"),
            ("title", "String!"),
            ("authorId", "Int!"),
            ("status", "Status!"),
            ("rating", "Float"),
        ])
    );
    assert_eq!(
        fields(object(&document, "TagConnection"))["nodes"],
        "[String!]!"
    );
    assert_eq!(fields(object(&document, "TagEdge"))["node"], "String!");
}

#[test]
fn test_connection_arguments() {
    let schema = Schema::build_test().unwrap().finish().unwrap();
    let sdl = schema.sdl();
    let document = parse_schema::<String>(&sdl).unwrap();
    let query = object(&document, "Query");

    let arg = |ty: &str| (ty.to_string(), None);
    let mut expected = BTreeMap::from([
        (
            "orderBy".to_string(),
            ("PostOrderBy".to_string(), Some("INDEX_ASC".to_string())),
        ),
        ("first".to_string(), arg("Int")),
        ("after".to_string(), arg("Cursor")),
        ("last".to_string(), arg("Int")),
        ("before".to_string(), arg("Cursor")),
    ]);
    let tags = expected
        .iter()
        .filter(|(name, _)| *name != "orderBy")
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect::<BTreeMap<_, _>>();
    expected.extend([
        ("index".to_string(), arg("Int")),
        ("id".to_string(), arg("ID")),
        ("title".to_string(), arg("String")),
        ("authorId".to_string(), arg("Int")),
        ("status".to_string(), arg("Status")),
        ("rating".to_string(), arg("Float")),
    ]);

    assert_eq!(arguments(query, "posts"), expected);
    assert_eq!(arguments(query, "tags"), tags);
    assert_eq!(fields(query)["posts"], "PostConnection!");
}

#[test]
fn test_generated_enums() {
    let schema = Schema::build_test().unwrap().finish().unwrap();
    let sdl = schema.sdl();
    let document = parse_schema::<String>(&sdl).unwrap();

    let items = |name: &str| {
        enum_type(&document, name).map(|r#enum| {
            r#enum
                .values
                .iter()
                .map(|value| value.name.clone())
                .collect::<BTreeSet<_>>()
        })
    };
    assert_eq!(
        items("PostOrderBy"),
        Some(BTreeSet::from(["INDEX_ASC".to_string(), "INDEX_DESC".to_string()]))
    );
    assert_eq!(
        items("Status"),
        Some(BTreeSet::from(["DRAFT".to_string(), "PUBLISHED".to_string()]))
    );
    assert_eq!(items("TagOrderBy"), None);
}

#[test]
fn test_reused_paginator_shares_types() {
    let posts = post_paginator();
    let schema = ConnectionSchemaBuilder::default()
        .connection("posts", &posts, ConnectionFieldConfig::default())
        .unwrap()
        .connection("recentPosts", &posts, ConnectionFieldConfig::default())
        .unwrap()
        .finish()
        .unwrap();
    let sdl = schema.sdl();
    let document = parse_schema::<String>(&sdl).unwrap();

    let query = fields(object(&document, "Query"));
    assert_eq!(query["posts"], "PostConnection!");
    assert_eq!(query["recentPosts"], "PostConnection!");
    assert_eq!(sdl.matches("type PostConnection").count(), 1);
}

#[test]
fn test_custom_query_type_name() {
    let config = ConnectionConfig {
        query_type_name: "Root".to_string(),
        ..ConnectionConfig::default()
    };
    let schema = Schema::build_test_with(config).unwrap().finish().unwrap();
    let sdl = schema.sdl();
    let document = parse_schema::<String>(&sdl).unwrap();
    assert!(fields(object(&document, "Root")).contains_key("tags"));
}
