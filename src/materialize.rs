//! Per-post detail records.
//!
//! Each post becomes one record with every field in
//! [`DETAIL_FIELDS`](crate::schema::DETAIL_FIELDS), rendered content included.

use crate::project::project_fields;
use crate::schema::{DETAIL_FIELDS, Post, Record};

/// One detail record per post, in input order.
pub fn materialize(posts: &[Post]) -> Vec<Record> {
    posts
        .iter()
        .map(|post| project_fields(post.fields(), &DETAIL_FIELDS))
        .collect()
}
