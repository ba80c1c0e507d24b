use thiserror::Error;

use crate::comments::{activate, CommentActivation, CommentConfig};
use crate::dates::{format_long_date, parse_post_date, DateStyle};
use crate::post::{NavLink, Post};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresentError {
    #[error("Invalid post {slug}: {reason}")]
    InvalidPost { slug: String, reason: String },
}

/// Everything the detail page shows, derived from one post and its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    /// Date as given by the content index, for `<time datetime>`
    pub date: String,
    pub formatted_date: String,
    pub display_minutes: u32,
    pub tag_labels: Vec<String>,
    /// Section root the post lives under, e.g. `blog`
    pub back_path: String,
    pub prev_link: Option<NavLink>,
    pub next_link: Option<NavLink>,
    pub comments: Option<CommentActivation>,
}

/// Derives the detail view of a post.
///
/// Fails with [`PresentError::InvalidPost`] when the date is not a calendar
/// date or the path has no section segment.
pub fn present_post(post: &Post, prev: Option<NavLink>, next: Option<NavLink>, locale: &str) -> Result<PostView, PresentError> {
    let invalid = |reason: String| PresentError::InvalidPost {
        slug: post.slug.clone(),
        reason,
    };

    let date = parse_post_date(&post.date).map_err(invalid)?;

    let back_path = match post.path.split('/').next() {
        Some(section) if !section.is_empty() => section.to_string(),
        _ => return Err(invalid(format!("no section in path [{}]", post.path))),
    };

    Ok(PostView {
        slug: post.slug.clone(),
        title: post.title.clone(),
        date: post.date.clone(),
        formatted_date: format_long_date(&date, locale, DateStyle::LongWithWeekday),
        display_minutes: display_minutes(post.reading_time_minutes),
        tag_labels: post.tags.clone(),
        back_path,
        prev_link: prev,
        next_link: next,
        comments: None,
    })
}

// Same compression as the home feed; kept separate so each page can change on its own.
fn display_minutes(reading_time_minutes: f64) -> u32 {
    (reading_time_minutes / 2.0 + 2.0).floor().max(2.0) as u32
}

/// Presenter bound to the site configuration.
pub struct PostPresenter {
    locale: String,
    comments: Option<CommentConfig>,
}

impl PostPresenter {
    pub fn new(locale: &str, comments: Option<CommentConfig>) -> Self {
        PostPresenter {
            locale: locale.to_string(),
            comments,
        }
    }

    pub fn comments_enabled(&self) -> bool {
        self.comments.as_ref().is_some_and(|c| c.enabled)
    }

    pub fn present(&self, post: &Post, prev: Option<NavLink>, next: Option<NavLink>) -> Result<PostView, PresentError> {
        let mut view = present_post(post, prev, next, &self.locale)?;
        view.comments = activate(self.comments.as_ref(), post);
        Ok(view)
    }
}
