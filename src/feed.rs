use std::num::NonZeroUsize;

use crate::post::Post;

/// Number of posts on the home page unless configured otherwise.
pub const MAX_DISPLAY: usize = 5;

pub struct FeedEntry<'a> {
    pub post: &'a Post,
    pub display_minutes: u32,
}

pub struct FeedSelection<'a> {
    pub shown: Vec<FeedEntry<'a>>,
    pub has_more: bool,
}

impl FeedSelection<'_> {
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

/// Takes the first `cap` posts, in the given order, for the home feed.
///
/// `posts` must already be ordered newest first.
pub fn select_feed(posts: &[Post], cap: NonZeroUsize) -> FeedSelection<'_> {
    let cap = cap.get();
    let shown = posts.iter()
        .take(cap)
        .map(|post| FeedEntry {
            post,
            display_minutes: display_minutes(post.reading_time_minutes),
        })
        .collect();

    FeedSelection {
        shown,
        has_more: posts.len() > cap,
    }
}

// Compresses the raw estimate: half of it plus two, never below two.
fn display_minutes(reading_time_minutes: f64) -> u32 {
    let minutes = (reading_time_minutes / 2.0 + 2.0).floor();
    minutes.max(2.0) as u32
}

#[cfg(test)]
mod tests {
    use crate::test_data::make_post;

    use super::*;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn posts(count: usize) -> Vec<Post> {
        (0..count)
            .map(|i| make_post(&format!("post-{}", i), &format!("2024-01-{:02}", 28 - i)))
            .collect()
    }

    #[test]
    fn test_empty() {
        let selection = select_feed(&[], cap(5));
        assert!(selection.is_empty());
        assert!(!selection.has_more);
    }

    #[test]
    fn test_truncates_and_flags_more() {
        let items = posts(7);
        let selection = select_feed(&items, cap(5));
        let slugs: Vec<_> = selection.shown.iter().map(|e| e.post.slug.as_str()).collect();
        assert_eq!(slugs, ["post-0", "post-1", "post-2", "post-3", "post-4"]);
        assert!(selection.has_more);
    }

    #[test]
    fn test_exact_cap_has_no_more() {
        let items = posts(5);
        let selection = select_feed(&items, cap(5));
        assert_eq!(selection.shown.len(), 5);
        assert!(!selection.has_more);
    }

    #[test]
    fn test_lengths_for_every_cap() {
        for len in 0..9 {
            let items = posts(len);
            for c in 1..9 {
                let selection = select_feed(&items, cap(c));
                assert_eq!(selection.shown.len(), len.min(c));
                assert_eq!(selection.has_more, len > c);
                for (entry, post) in selection.shown.iter().zip(items.iter()) {
                    assert_eq!(entry.post, post);
                }
            }
        }
    }

    #[test]
    fn test_display_minutes() {
        assert_eq!(display_minutes(0.0), 2);
        assert_eq!(display_minutes(1.9), 2);
        assert_eq!(display_minutes(2.0), 3);
        assert_eq!(display_minutes(10.0), 7);
        assert_eq!(display_minutes(-8.0), 2);
    }

    #[test]
    fn test_display_minutes_is_monotonic() {
        let mut last = 0;
        for tenth in 0..600 {
            let minutes = display_minutes(tenth as f64 / 10.0);
            assert!(minutes >= 2);
            assert!(minutes >= last);
            last = minutes;
        }
    }

    #[test]
    fn test_entries_carry_minutes() {
        let mut items = posts(1);
        items[0].reading_time_minutes = 10.0;
        let selection = select_feed(&items, cap(5));
        assert_eq!(selection.shown[0].display_minutes, 7);
    }
}
