//! The export pipeline.
//!
//! [`export`] turns the host's posts into two directories of JSON files:
//!
//! ```text
//! source/json/
//! ├── pagination/
//! │   ├── 0.json        # { hasMore, totalCount, result, totalPage, currentPage, currentCount }
//! │   ├── 1.json
//! │   └── 2.json
//! └── post/
//!     ├── 2021_03_hello_.json   # 14 detail fields
//!     └── about.json
//! ```
//!
//! The work is split into a pure planning step and a writing step:
//!
//! 1. [`plan`] validates the page size, the output directories and every
//!    post path. It derives all filenames and builds the page and detail
//!    records in memory. Nothing on disk is touched, so a bad post never
//!    wipes the previous build.
//! 2. The pagination and post branches then run in parallel. Each branch
//!    resets its directory and only afterwards writes its files, which are
//!    themselves written in parallel.
//!
//! The first failure aborts the export and is returned as-is; there are no
//! retries.

use crate::config::{ConfigError, ExportConfig};
use crate::materialize::materialize;
use crate::naming::{page_file_name, post_file_names};
use crate::outdir::OutputDir;
use crate::paginate::{PageRecord, paginate};
use crate::schema::{Post, Record, ValidationError};
use rayon::prelude::*;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
    #[error("Invalid post: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid output directories: {0}")]
    Config(#[from] ConfigError),
}

/// All records of an export, ready to be written.
#[derive(Debug)]
pub struct ExportPlan {
    pub pages: Vec<PageRecord>,
    pub page_files: Vec<PathBuf>,
    pub details: Vec<Record>,
    pub post_files: Vec<PathBuf>,
    entries: Vec<PostEntry>,
}

/// What was (or would be) written, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub pagination_dir: PathBuf,
    pub post_dir: PathBuf,
    pub pages: Vec<PageEntry>,
    pub posts: Vec<PostEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub index: usize,
    pub post_count: usize,
    pub file_name: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostEntry {
    pub title: Option<String>,
    pub path: String,
    pub file_name: PathBuf,
}

/// Validate inputs and build every record without touching the filesystem.
pub fn plan(posts: &[Post], config: &ExportConfig) -> Result<ExportPlan, ExportError> {
    let per_page =
        NonZeroUsize::new(config.per_page).ok_or(ExportError::InvalidPageSize(config.per_page))?;
    config.validate_output_dirs()?;
    let post_files = post_file_names(posts, config.file_naming)?;

    let pages = paginate(posts, per_page);
    let page_files = (0..pages.len()).map(|i| PathBuf::from(page_file_name(i))).collect();
    let details = materialize(posts);

    let entries = posts
        .iter()
        .zip(&post_files)
        .map(|(post, file_name)| PostEntry {
            title: post.title().map(str::to_string),
            path: post.path().unwrap_or_default().to_string(),
            file_name: file_name.clone(),
        })
        .collect();

    Ok(ExportPlan {
        pages,
        page_files,
        details,
        post_files,
        entries,
    })
}

impl ExportPlan {
    pub fn report(&self, config: &ExportConfig) -> ExportReport {
        ExportReport {
            pagination_dir: config.pagination_output_dir(),
            post_dir: config.post_output_dir(),
            pages: self
                .pages
                .iter()
                .zip(&self.page_files)
                .map(|(page, file_name)| PageEntry {
                    index: page.current_page,
                    post_count: page.current_count,
                    file_name: file_name.clone(),
                })
                .collect(),
            posts: self.entries.clone(),
        }
    }
}

/// Export `posts` into the pagination and post directories of `config`.
pub fn export(posts: &[Post], config: &ExportConfig) -> Result<ExportReport, ExportError> {
    let plan = plan(posts, config)?;
    let pagination_dir = config.pagination_output_dir();
    let post_dir = config.post_output_dir();

    let (pages, details) = rayon::join(
        || write_branch(&pagination_dir, &plan.page_files, &plan.pages, config),
        || write_branch(&post_dir, &plan.post_files, &plan.details, config),
    );
    pages?;
    details?;

    Ok(plan.report(config))
}

/// Reset `dir`, then write `records[i]` to `files[i]` inside it.
fn write_branch<T: Serialize + Sync>(
    dir: &Path,
    files: &[PathBuf],
    records: &[T],
    config: &ExportConfig,
) -> Result<(), ExportError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ExportError::Io { path, source }
    };

    let out = OutputDir::new(dir, config.atomic).map_err(io_err(dir))?;
    out.reset().map_err(io_err(out.path()))?;
    files
        .par_iter()
        .zip(records.par_iter())
        .try_for_each(|(file, record)| {
            out.write_json(file, record, config.pretty)
                .map(|_| ())
                .map_err(io_err(&out.path().join(file)))
        })?;
    out.commit().map_err(io_err(dir))
}
