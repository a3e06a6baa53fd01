use super::fixtures::*;
use super::self_prelude::*;
use crate::config::ConnectionConfig;
use crate::schema::*;

use async_graphql::dynamic::*;
use async_graphql::Request;
use graphql_parser::{parse_schema, Style};

/// A request carrying a fresh [`RequestContext`].
pub fn test_request(query: &str) -> Request {
    Request::new(query).data(RequestContext::new())
}

#[extension_trait]
pub impl TestSchema for Schema {
    /// Root `posts` (with field conditions) and `tags` connections.
    fn build_test() -> BuildResult<ConnectionSchemaBuilder> {
        Self::build_test_with(ConnectionConfig::default())
    }

    fn build_test_with(config: ConnectionConfig) -> BuildResult<ConnectionSchemaBuilder> {
        ConnectionSchemaBuilder::new(config)
            .connection(
                "posts",
                &post_paginator(),
                ConnectionFieldConfig::default().with_fields_condition(),
            )?
            .connection("tags", &tag_paginator(), ConnectionFieldConfig::default())
    }

    fn pretty_sdl(&self) -> String {
        let sdl = self.sdl();
        let ugly = parse_schema::<&str>(&sdl).unwrap();
        ugly.format(&Style::default())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn sdl() {
        // Build the schema
        let schema = Schema::build_test().unwrap();
        let schema = schema.finish();
        assert_matches!(schema, Ok(_));
        let schema = schema.unwrap();

        // Print the schema
        let text = schema.pretty_sdl();
        assert!(text.contains("type PostConnection"));
        assert!(text.contains("enum PostOrderBy"));
        assert!(!text.contains("TagOrderBy"));
    }
}
