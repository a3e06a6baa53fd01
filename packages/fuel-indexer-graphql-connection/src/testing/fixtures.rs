use super::paginator::*;
use super::self_prelude::*;

pub fn status_type() -> NamedType {
    NamedType::enumeration("status", ["draft", "published"])
}

pub fn post_type() -> Type {
    let post = ObjectType::new("post")
        .description("A blog post.")
        .field("index", NamedType::int())
        .field("id", NamedType::id())
        .field("title", NamedType::string())
        .described_field("author_id", NamedType::int(), Some("Id of the author."))
        .field("status", status_type())
        .field("rating", Type::nullable(NamedType::float()));
    Type::from(NamedType::object(post))
}

/// Ten posts; five by author 1 and five by author 2. Odd posts are drafts
/// and every third post is unrated.
pub fn posts() -> Vec<Value> {
    (0..10)
        .map(|index: i64| {
            let status = if index % 2 == 0 { "published" } else { "draft" };
            let rating = match index % 3 {
                0 => Value::Null,
                _ => json!(index as f64 / 2.0),
            };
            json!({
                "index": index,
                "id": format!("post:{}", index),
                "title": format!("Post #{}", index),
                "author_id": index / 5 + 1,
                "status": status,
                "rating": rating,
            })
        })
        .collect()
}

pub fn new_post_paginator() -> MemoryPaginator {
    MemoryPaginator::new("post", post_type(), posts())
        .ordering(FieldOrdering::ascending("index_asc", "index"))
        .ordering(FieldOrdering::descending("index_desc", "index"))
}

pub fn post_paginator() -> PaginatorHandle {
    PaginatorHandle::new(new_post_paginator())
}

/// Tags are bare strings without orderings.
pub fn new_tag_paginator() -> MemoryPaginator {
    MemoryPaginator::new(
        "tag",
        Type::from(NamedType::string()),
        vec![json!("rust"), json!("graphql"), json!("relay")],
    )
}

pub fn tag_paginator() -> PaginatorHandle {
    PaginatorHandle::new(new_tag_paginator())
}
