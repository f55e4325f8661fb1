//! Post record schema.
//!
//! The host site generator hands over posts as loose JSON objects. Rather than
//! picking fields by name wherever they are needed, every field the exporter
//! knows about is a [`PostField`] with a [`FieldKind`], and each output kind
//! has a fixed, ordered field list:
//!
//! | Output | Fields |
//! |--------|--------|
//! | Summary (inside pagination pages) | [`SUMMARY_FIELDS`] (8 fields) |
//! | Detail (one file per post) | [`DETAIL_FIELDS`] (14 fields) |
//!
//! A [`Post`] keeps the host's record untouched, including fields the exporter
//! never reads. Known fields are type-checked when the post is built, so a
//! `photos` string or a numeric `title` is reported with the post's index
//! instead of leaking into the output. Every known field is nullable: absent
//! and `null` both mean "not set".

use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A JSON object keyed by field name.
pub type Record = Map<String, Value>;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("post #{index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("post #{index} has no `path`")]
    MissingPath { index: usize },
    #[error("post #{index} has an empty `path`")]
    EmptyPath { index: usize },
    #[error("post #{index} has a path that escapes the output directory: {path}")]
    UnsafePath { index: usize, path: String },
    #[error("posts #{first} and #{second} both write to {file_name}")]
    DuplicateFileName {
        first: usize,
        second: usize,
        file_name: PathBuf,
    },
    #[error("post #{index} field `{field}` must be {expected}")]
    FieldType {
        index: usize,
        field: PostField,
        expected: FieldKind,
    },
}

/// Semantic type of a known post field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Either an ISO-8601 string or a numeric epoch value, as hosts differ.
    Timestamp,
    Url,
    Sequence,
    Flag,
}

impl FieldKind {
    /// Whether `value` is acceptable for this kind. `null` always is.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldKind::Text | FieldKind::Url, Value::String(_)) => true,
            (FieldKind::Timestamp, Value::String(_) | Value::Number(_)) => true,
            (FieldKind::Sequence, Value::Array(_)) => true,
            (FieldKind::Flag, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Text => "a string",
            FieldKind::Timestamp => "a timestamp string or number",
            FieldKind::Url => "a URL string",
            FieldKind::Sequence => "an array",
            FieldKind::Flag => "a boolean",
        };
        f.write_str(s)
    }
}

/// Every post field the exporter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Title,
    Date,
    Updated,
    Comments,
    Layout,
    Content,
    Excerpt,
    More,
    Source,
    FullSource,
    Path,
    Permalink,
    Photos,
    Link,
}

impl PostField {
    /// All known fields, in detail order.
    pub const ALL: [PostField; 14] = DETAIL_FIELDS;

    /// The record key for this field.
    pub const fn key(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Date => "date",
            PostField::Updated => "updated",
            PostField::Comments => "comments",
            PostField::Layout => "layout",
            PostField::Content => "content",
            PostField::Excerpt => "excerpt",
            PostField::More => "more",
            PostField::Source => "source",
            PostField::FullSource => "full_source",
            PostField::Path => "path",
            PostField::Permalink => "permalink",
            PostField::Photos => "photos",
            PostField::Link => "link",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            PostField::Date | PostField::Updated => FieldKind::Timestamp,
            PostField::Permalink | PostField::Link => FieldKind::Url,
            PostField::Photos => FieldKind::Sequence,
            PostField::Comments => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields copied into each entry of a pagination page's `result`.
pub const SUMMARY_FIELDS: [PostField; 8] = [
    PostField::Title,
    PostField::Date,
    PostField::Excerpt,
    PostField::Source,
    PostField::Path,
    PostField::Permalink,
    PostField::Photos,
    PostField::Link,
];

/// Fields copied into each per-post detail file.
pub const DETAIL_FIELDS: [PostField; 14] = [
    PostField::Title,
    PostField::Date,
    PostField::Updated,
    PostField::Comments,
    PostField::Layout,
    PostField::Content,
    PostField::Excerpt,
    PostField::More,
    PostField::Source,
    PostField::FullSource,
    PostField::Path,
    PostField::Permalink,
    PostField::Photos,
    PostField::Link,
];

/// One post as supplied by the host. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    fields: Record,
}

impl Post {
    /// Build a post from the host's JSON value, checking known field types.
    ///
    /// `index` is the post's position in the host collection and is only used
    /// in error messages.
    pub fn from_value(index: usize, value: Value) -> Result<Post, ValidationError> {
        match value {
            Value::Object(fields) => Post::from_record(index, fields),
            _ => Err(ValidationError::NotAnObject { index }),
        }
    }

    pub fn from_record(index: usize, fields: Record) -> Result<Post, ValidationError> {
        for field in PostField::ALL {
            if let Some(value) = fields.get(field.key()) {
                if !field.kind().accepts(value) {
                    return Err(ValidationError::FieldType {
                        index,
                        field,
                        expected: field.kind(),
                    });
                }
            }
        }
        Ok(Post { fields })
    }

    /// The full host record, unknown fields included.
    pub fn fields(&self) -> &Record {
        &self.fields
    }

    /// The value of a known field, treating `null` as absent.
    pub fn get(&self, field: PostField) -> Option<&Value> {
        self.fields.get(field.key()).filter(|v| !v.is_null())
    }

    fn get_str(&self, field: PostField) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str(PostField::Title)
    }

    pub fn path(&self) -> Option<&str> {
        self.get_str(PostField::Path)
    }
}
