//! Pagination of the post list.
//!
//! Posts are split into consecutive chunks of `per_page`, in input order. The
//! last chunk may be shorter. Each chunk becomes a [`PageRecord`] carrying its
//! position among all pages:
//!
//! ```text
//! 25 posts, per_page = 10
//!
//! page 0  currentCount 10  hasMore true
//! page 1  currentCount 10  hasMore true
//! page 2  currentCount 5   hasMore false   (totalPage 3, totalCount 25)
//! ```
//!
//! An empty post list produces no pages at all. The page size is a
//! [`NonZeroUsize`], so a zero size has to be rejected before it gets here.

use crate::project::project_fields;
use crate::schema::{Post, Record, SUMMARY_FIELDS};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Posts per page when nothing else is configured.
pub const DEFAULT_PER_PAGE: usize = 10;

/// One pagination page, as written to `<index>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// False only on the last page.
    pub has_more: bool,
    /// Number of posts across all pages.
    pub total_count: usize,
    /// Summary projections of this page's posts.
    pub result: Vec<Record>,
    pub total_page: usize,
    /// Zero-based.
    pub current_page: usize,
    pub current_count: usize,
}

/// Number of pages needed for `total` posts.
pub fn page_count(total: usize, per_page: NonZeroUsize) -> usize {
    total.div_ceil(per_page.get())
}

/// Split `posts` into summary pages of at most `per_page` posts.
pub fn paginate(posts: &[Post], per_page: NonZeroUsize) -> Vec<PageRecord> {
    let total_count = posts.len();
    let total_page = page_count(total_count, per_page);

    posts
        .chunks(per_page.get())
        .enumerate()
        .map(|(i, chunk)| {
            let result: Vec<Record> = chunk
                .iter()
                .map(|post| project_fields(post.fields(), &SUMMARY_FIELDS))
                .collect();
            PageRecord {
                has_more: i != total_page - 1,
                total_count,
                current_count: result.len(),
                result,
                total_page,
                current_page: i,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::numbered_posts;
    use serde_json::Value;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn twenty_five_posts_make_three_pages() {
        let pages = paginate(&numbered_posts(25), size(10));
        let counts: Vec<usize> = pages.iter().map(|p| p.current_count).collect();
        let more: Vec<bool> = pages.iter().map(|p| p.has_more).collect();
        assert_eq!(counts, vec![10, 10, 5]);
        assert_eq!(more, vec![true, true, false]);
        assert!(pages.iter().all(|p| p.total_page == 3 && p.total_count == 25));
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let pages = paginate(&numbered_posts(10), size(10));
        assert_eq!(pages.len(), 1);
        assert!(!pages[0].has_more);
        assert_eq!(pages[0].current_count, 10);
        assert_eq!(pages[0].total_page, 1);
    }

    #[test]
    fn no_posts_no_pages() {
        assert!(paginate(&[], size(10)).is_empty());
        assert_eq!(page_count(0, size(10)), 0);
    }

    #[test]
    fn current_page_is_zero_based_and_ascending() {
        let pages = paginate(&numbered_posts(7), size(2));
        let indices: Vec<usize> = pages.iter().map(|p| p.current_page).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn counts_sum_to_total() {
        for (n, per) in [(1, 1), (9, 4), (30, 7), (100, 10), (3, 50)] {
            let pages = paginate(&numbered_posts(n), size(per));
            let sum: usize = pages.iter().map(|p| p.current_count).sum();
            assert_eq!(sum, n, "n={n} per={per}");
            assert_eq!(pages.len(), n.div_ceil(per), "n={n} per={per}");
        }
    }

    #[test]
    fn concatenated_results_preserve_input_order() {
        let posts = numbered_posts(13);
        let pages = paginate(&posts, size(4));
        let paths: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.result.iter())
            .map(|r| r["path"].as_str().unwrap())
            .collect();
        let expected: Vec<&str> = posts.iter().map(|p| p.path().unwrap()).collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn results_hold_exactly_the_summary_fields() {
        let pages = paginate(&numbered_posts(3), size(10));
        for entry in &pages[0].result {
            let keys: Vec<&str> = entry.keys().map(String::as_str).collect();
            assert_eq!(
                keys,
                vec!["title", "date", "excerpt", "source", "path", "permalink", "photos", "link"]
            );
            assert!(!entry.contains_key("content"));
        }
    }

    #[test]
    fn missing_excerpt_is_null_not_dropped() {
        let pages = paginate(&numbered_posts(1), size(10));
        assert_eq!(pages[0].result[0].get("excerpt"), Some(&Value::Null));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let pages = paginate(&numbered_posts(1), size(10));
        let value = serde_json::to_value(&pages[0]).unwrap();
        let object = value.as_object().unwrap();
        for key in ["hasMore", "totalCount", "result", "totalPage", "currentPage", "currentCount"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object.len(), 6);
    }
}
