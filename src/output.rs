//! CLI output formatting.
//!
//! Output is information-first: each page and post leads with a positional
//! index and its identity (page number, post title), followed by the file it
//! maps to.
//!
//! ```text
//! Pagination → source/json/pagination
//!     001 page 0 (10 posts) → 0.json
//!     002 page 1 (5 posts) → 1.json
//! Posts → source/json/post
//!     001 Hello world → 2021_03_hello-world_.json
//!     002 (about/) → about_.json
//!
//! Exported 2 pages, 2 posts
//! ```
//!
//! Untitled posts show their `path` in parentheses, since the path is their
//! only identity.
//!
//! Each `format_*` function is pure and returns lines; `print_*` wrappers
//! write them to stdout.

use crate::export::{ExportReport, PageEntry, PostEntry};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn page_line(position: usize, page: &PageEntry) -> String {
    format!(
        "    {} page {} ({}) → {}",
        format_index(position),
        page.index,
        plural(page.post_count, "post", "posts"),
        page.file_name.display()
    )
}

fn post_line(position: usize, post: &PostEntry) -> String {
    let identity = match post.title.as_deref() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => format!("({})", post.path),
    };
    format!(
        "    {} {} → {}",
        format_index(position),
        identity,
        post.file_name.display()
    )
}

fn report_lines(report: &ExportReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Pagination → {}", report.pagination_dir.display()));
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(page_line(i + 1, page));
    }

    lines.push(format!("Posts → {}", report.post_dir.display()));
    for (i, post) in report.posts.iter().enumerate() {
        lines.push(post_line(i + 1, post));
    }

    lines.push(String::new());
    lines
}

fn totals(report: &ExportReport) -> String {
    format!(
        "{}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.posts.len(), "post", "posts")
    )
}

/// Lines describing a finished export.
pub fn format_export_output(report: &ExportReport) -> Vec<String> {
    let mut lines = report_lines(report);
    lines.push(format!("Exported {}", totals(report)));
    lines
}

/// Lines describing what an export would write.
pub fn format_check_output(report: &ExportReport) -> Vec<String> {
    let mut lines = report_lines(report);
    lines.push(format!("Would export {}", totals(report)));
    lines
}

pub fn print_export_output(report: &ExportReport) {
    for line in format_export_output(report) {
        println!("{}", line);
    }
}

pub fn print_check_output(report: &ExportReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_report() -> ExportReport {
        ExportReport {
            pagination_dir: PathBuf::from("source/json/pagination"),
            post_dir: PathBuf::from("source/json/post"),
            pages: vec![
                PageEntry {
                    index: 0,
                    post_count: 10,
                    file_name: PathBuf::from("0.json"),
                },
                PageEntry {
                    index: 1,
                    post_count: 1,
                    file_name: PathBuf::from("1.json"),
                },
            ],
            posts: vec![
                PostEntry {
                    title: Some("Hello world".into()),
                    path: "2021/hello/".into(),
                    file_name: PathBuf::from("2021_hello_.json"),
                },
                PostEntry {
                    title: None,
                    path: "about/".into(),
                    file_name: PathBuf::from("about_.json"),
                },
            ],
        }
    }

    #[test]
    fn export_output_lists_pages_and_posts() {
        let lines = format_export_output(&sample_report());
        assert_eq!(
            lines,
            vec![
                "Pagination → source/json/pagination",
                "    001 page 0 (10 posts) → 0.json",
                "    002 page 1 (1 post) → 1.json",
                "Posts → source/json/post",
                "    001 Hello world → 2021_hello_.json",
                "    002 (about/) → about_.json",
                "",
                "Exported 2 pages, 2 posts",
            ]
        );
    }

    #[test]
    fn empty_title_falls_back_to_path() {
        let post = PostEntry {
            title: Some(String::new()),
            path: "x".into(),
            file_name: PathBuf::from("x.json"),
        };
        assert_eq!(post_line(1, &post), "    001 (x) → x.json");
    }

    #[test]
    fn check_output_uses_conditional_footer() {
        let report = ExportReport {
            pages: vec![],
            posts: vec![],
            ..sample_report()
        };
        let lines = format_check_output(&report);
        assert_eq!(lines.last().unwrap(), "Would export 0 pages, 0 posts");
    }
}
