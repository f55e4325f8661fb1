//! Loading host post records.
//!
//! The host site generator parses and renders posts; the exporter only needs
//! the resulting records. Three dump layouts are accepted:
//!
//! ```text
//! posts.json          [ {post}, {post}, … ]
//! site.json           { "posts": [ {post}, … ], … }
//! posts/              one {post} per *.json file, ordered by file name
//! ├── 0001-hello.json
//! └── 0002-world.json
//! ```
//!
//! Order matters: it is the order posts appear in pagination pages. In the
//! directory layout, files are walked recursively and sorted by name at every
//! level, so numbered file names give a stable order. Hidden files are
//! skipped.

use crate::schema::{Post, ValidationError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{0}: expected an array of posts or an object with a `posts` array")]
    UnsupportedShape(PathBuf),
    #[error("Invalid post: {0}")]
    Validation(#[from] ValidationError),
}

/// Load posts from a dump file or a directory of per-post files.
pub fn load_posts(path: &Path) -> Result<Vec<Post>, InputError> {
    if path.is_dir() {
        load_post_dir(path)
    } else {
        let value = read_json(path)?;
        posts_from_value(value).ok_or_else(|| InputError::UnsupportedShape(path.to_path_buf()))?
    }
}

/// Extract posts from an array or a `{ "posts": [...] }` object.
///
/// Returns `None` when `value` has neither shape.
pub fn posts_from_value(value: Value) -> Option<Result<Vec<Post>, InputError>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut site) => match site.remove("posts") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    Some(
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Post::from_value(index, item).map_err(InputError::from))
            .collect(),
    )
}

fn load_post_dir(dir: &Path) -> Result<Vec<Post>, InputError> {
    let mut posts = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_json(entry.path()) {
            continue;
        }
        let value = read_json(entry.path())?;
        posts.push(Post::from_value(posts.len(), value)?);
    }
    Ok(posts)
}

fn read_json(path: &Path) -> Result<Value, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
