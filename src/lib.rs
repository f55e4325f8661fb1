//! # json-pages
//!
//! Exports blog posts as static JSON for client-rendered sites. The host
//! site generator parses and renders posts; json-pages takes the finished
//! records and writes two directories:
//!
//! ```text
//! source/json/pagination/<n>.json         listing pages of post summaries
//! source/json/post/<sanitized path>.json  one detail record per post
//! ```
//!
//! A front end can then fetch `pagination/0.json`, follow `hasMore` to the
//! next page, and load `post/<file>.json` when a post is opened.
//!
//! # Pipeline
//!
//! ```text
//! posts ─┬─ paginate ──── reset pagination/ ── write <n>.json
//!        └─ materialize ─ reset post/ ──────── write <path>.json
//! ```
//!
//! Both branches only read the posts and run in parallel. Within a branch the
//! directory reset always completes before the first write.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Known post fields, their types, and the summary/detail field lists |
//! | [`project`] | Field projection with `null` for missing fields |
//! | [`paginate`] | Splits posts into pages with position metadata |
//! | [`materialize`] | Builds per-post detail records |
//! | [`naming`] | Page and post filename rules |
//! | [`outdir`] | Directory reset, staged writes, JSON file output |
//! | [`export`] | The orchestrator: plan, then write both branches |
//! | [`config`] | `json-pages.toml` loading, defaults, and validation |
//! | [`input`] | Reading host post dumps (file or directory) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fixed Output Shape
//!
//! Every summary has the same 8 keys and every detail the same 14, whatever
//! the host filled in. Missing fields are written as `null`, so consumers
//! never have to distinguish "absent" from "empty".
//!
//! ## Validate Before Wiping
//!
//! Output directories are emptied on every run, so all validation happens
//! before the first directory is touched: the page size, the two output
//! directories (which must not overlap) and every post path (missing, unsafe
//! or colliding with another post's file or directory). A bad post leaves the
//! previous build in place.
//!
//! ## Flat Post Filenames
//!
//! Post paths are flattened by replacing every separator with `_`. The older
//! behaviour of replacing only the first `/` is available as
//! `file_naming = "first-slash"`; see [`naming`].

pub mod config;
pub mod export;
pub mod input;
pub mod materialize;
pub mod naming;
pub mod outdir;
pub mod output;
pub mod paginate;
pub mod project;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;
