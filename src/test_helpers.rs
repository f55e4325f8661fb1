//! Shared test utilities for the json-pages test suite.
//!
//! Provides post builders and filesystem readers used across module tests.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let posts = numbered_posts(25);
//! export(&posts, &config).unwrap();
//! assert_eq!(dir_entries(&config.pagination_output_dir()), vec!["0.json", "1.json", "2.json"]);
//! ```

use crate::schema::Post;
use serde_json::{Value, json};
use std::path::Path;

// =========================================================================
// Post builders
// =========================================================================

/// Build a post from a JSON object literal. Panics if it is not a valid post.
pub fn post_from(value: Value) -> Post {
    Post::from_value(0, value).unwrap_or_else(|e| panic!("invalid test post: {e}"))
}

/// `n` posts with paths `posts/post-{i}`, titles, dates and permalinks.
/// None of them have an excerpt or content.
pub fn numbered_posts(n: usize) -> Vec<Post> {
    (0..n)
        .map(|i| {
            post_from(json!({
                "title": format!("Post {i}"),
                "date": format!("2021-01-{:02}T00:00:00.000Z", i % 28 + 1),
                "path": format!("posts/post-{i}"),
                "permalink": format!("https://example.com/posts/post-{i}/"),
                "photos": [],
            }))
        })
        .collect()
}

/// All post paths, in order.
pub fn paths_of(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.path().unwrap_or("")).collect()
}

// =========================================================================
// Filesystem readers
// =========================================================================

/// Sorted names of the direct children of `dir`. Panics if unreadable.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Parse a JSON file. Panics if missing or invalid.
pub fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("invalid JSON in {}: {e}", path.display()))
}
