use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer};

/// A post as produced by the content build.
///
/// Example of an entry in the content index
/// ```json
/// {
///   "slug": "first-post",
///   "date": "2024-03-05T09:00:00.000Z",
///   "title": "First post",
///   "summary": "Hello there",
///   "tags": ["rust", "blog"],
///   "readingTime": { "minutes": 4.2 },
///   "path": "blog/first-post"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub slug: String,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "readingTime", deserialize_with = "deserialize_minutes")]
    pub reading_time_minutes: f64,
    pub path: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub draft: bool,
}

/// Previous or next post, as a link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub path: String,
    pub title: String,
}

impl From<&Post> for NavLink {
    fn from(post: &Post) -> Self {
        NavLink {
            path: post.path.clone(),
            title: post.title.clone(),
        }
    }
}

/// URL of the page serving `path`, e.g. `blog/first-post` is served at `/blog/first-post/`.
pub fn page_link(path: &str) -> String {
    format!("/{}/", path.trim_matches('/'))
}

impl Post {
    pub fn link(&self) -> String {
        page_link(&self.path)
    }
}

impl NavLink {
    pub fn link(&self) -> String {
        page_link(&self.path)
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, path={}, tags=[{}]\ntitle={}",
               self.slug,
               self.date,
               self.path,
               self.tags.join(", "),
               self.title,
        )
    }
}

fn deserialize_minutes<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct ReadingTime {
        #[serde(default)]
        minutes: f64,
    }

    let reading_time = ReadingTime::deserialize(deserializer)?;
    Ok(reading_time.minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "slug": "first-post",
            "date": "2024-03-05T09:00:00.000Z",
            "title": "First post",
            "summary": "Hello there",
            "tags": ["rust", "blog"],
            "readingTime": { "text": "5 min read", "minutes": 4.2, "words": 840 },
            "path": "blog/first-post",
            "body": "Some *markdown*"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.slug, "first-post");
        assert_eq!(post.tags, ["rust", "blog"]);
        assert_eq!(post.reading_time_minutes, 4.2);
        assert_eq!(post.path, "blog/first-post");
        assert!(!post.draft);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "slug": "bare",
            "date": "2024-03-05",
            "title": "Bare",
            "path": "blog/bare"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.summary, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.reading_time_minutes, 0.0);
        assert_eq!(post.body, "");
    }

    #[test]
    fn test_nav_link_from_post() {
        let json = r#"{"slug": "a", "date": "2024-03-05", "title": "A title", "path": "blog/a"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        let link = NavLink::from(&post);
        assert_eq!(link, NavLink { path: "blog/a".to_string(), title: "A title".to_string() });
        assert_eq!(link.link(), "/blog/a/");
    }

    #[test]
    fn test_page_link() {
        assert_eq!(page_link("blog/nested/part-one"), "/blog/nested/part-one/");
        assert_eq!(page_link("/notes/x/"), "/notes/x/");
    }

    #[test]
    fn test_display() {
        let json = r#"{"slug": "a", "date": "2024-03-05", "title": "A title", "tags": ["x", "y"], "path": "blog/a"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.to_string(), "slug=a, date=2024-03-05, path=blog/a, tags=[x, y]\ntitle=A title");
    }
}
