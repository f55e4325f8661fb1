//! Output filename rules.
//!
//! Pagination pages are named by their zero-based index, without padding:
//! `0.json`, `1.json`, … `10.json`.
//!
//! Post files are named after the post's `path`, which the host guarantees
//! to be unique but which usually contains `/` (`2021/03/hello-world/`). How
//! separators are flattened depends on [`FileNaming`]:
//!
//! | `path` | `all-separators` (default) | `first-slash` |
//! |--------|----------------------------|---------------|
//! | `foo/bar` | `foo_bar.json` | `foo_bar.json` |
//! | `2021/03/hello/` | `2021_03_hello_.json` | `2021_03/hello/.json` |
//! | `notes` | `notes.json` | `notes.json` |
//!
//! `first-slash` reproduces the naming of older exports, where only the first
//! `/` was replaced and the rest of the path became nested directories under
//! the post directory.
//!
//! Either way, a post with no `path` is an error, and so is a path whose file
//! would land outside the post directory or on top of another post's file.

use crate::schema::{Post, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Extension of every exported file.
pub const EXTENSION: &str = "json";

/// How a post `path` is turned into a filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileNaming {
    /// Replace every `/` and `\` with `_`. Always a flat file.
    #[default]
    AllSeparators,
    /// Replace only the first `/` with `_`.
    FirstSlash,
}

/// Filename of the pagination page at `index`.
pub fn page_file_name(index: usize) -> String {
    format!("{index}.{EXTENSION}")
}

/// Flatten a post path into a file stem, without extension or validation.
pub fn post_file_stem(path: &str, naming: FileNaming) -> String {
    match naming {
        FileNaming::AllSeparators => path.replace(['/', '\\'], "_"),
        FileNaming::FirstSlash => path.replacen('/', "_", 1),
    }
}

/// Relative output path for the post at `index`.
pub fn post_file_name(
    index: usize,
    post: &Post,
    naming: FileNaming,
) -> Result<PathBuf, ValidationError> {
    let path = post.path().ok_or(ValidationError::MissingPath { index })?;
    if path.is_empty() {
        return Err(ValidationError::EmptyPath { index });
    }

    let file_name = PathBuf::from(format!("{}.{EXTENSION}", post_file_stem(path, naming)));
    if !stays_inside(&file_name) {
        return Err(ValidationError::UnsafePath {
            index,
            path: path.to_string(),
        });
    }
    Ok(file_name)
}

/// Output paths for all posts, rejecting two posts that map to the same file.
///
/// With nested names a file can also clash with a directory another post
/// needs (`a_b.json` and `a_b.json/c.json`); that is reported the same way,
/// naming the file and the directory post.
pub fn post_file_names(posts: &[Post], naming: FileNaming) -> Result<Vec<PathBuf>, ValidationError> {
    let mut files: HashMap<PathBuf, usize> = HashMap::new();
    let mut dirs: HashMap<PathBuf, usize> = HashMap::new();
    let mut names = Vec::with_capacity(posts.len());

    for (index, post) in posts.iter().enumerate() {
        let file_name = post_file_name(index, post, naming)?;
        let clash = |first: usize, file_name: &Path| ValidationError::DuplicateFileName {
            first,
            second: index,
            file_name: file_name.to_path_buf(),
        };

        if let Some(&first) = files.get(&file_name).or_else(|| dirs.get(&file_name)) {
            return Err(clash(first, &file_name));
        }
        let parents: Vec<&Path> = file_name
            .ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        for parent in &parents {
            if let Some(&first) = files.get(*parent) {
                return Err(clash(first, parent));
            }
        }
        for parent in parents {
            dirs.entry(parent.to_path_buf()).or_insert(index);
        }
        files.insert(file_name.clone(), index);
        names.push(file_name);
    }
    Ok(names)
}

fn stays_inside(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
