#[cfg(test)]
use crate::post::Post;

#[cfg(test)]
pub const CONTENT_INDEX: &str = r#"[
  {
    "slug": "hello-rust",
    "date": "2024-03-05T09:00:00.000Z",
    "title": "Hello, Rust",
    "summary": "Notes from the first week",
    "tags": ["rust", "beginner"],
    "readingTime": { "text": "5 min read", "minutes": 4.6, "words": 920 },
    "path": "blog/hello-rust",
    "body": "First paragraph.\n\n## Second section\n\nMore text."
  },
  {
    "slug": "draft-post",
    "date": "2024-04-01",
    "title": "Not yet",
    "path": "blog/draft-post",
    "draft": true
  },
  {
    "slug": "old-post",
    "date": "2023-11-20",
    "title": "An older post",
    "summary": "From last year",
    "tags": ["life"],
    "readingTime": { "minutes": 1.2 },
    "path": "blog/old-post"
  },
  {
    "slug": "newest",
    "date": "2024-05-10T12:00:00+09:00",
    "title": "The newest one",
    "summary": "Fresh",
    "tags": ["rust", "Web Dev"],
    "readingTime": { "minutes": 10 },
    "path": "blog/newest"
  }
]"#;

#[cfg(test)]
pub fn make_post(slug: &str, date: &str) -> Post {
    Post {
        slug: slug.to_string(),
        date: date.to_string(),
        title: format!("Title of {}", slug),
        summary: format!("Summary of {}", slug),
        tags: vec![],
        reading_time_minutes: 0.0,
        path: format!("blog/{}", slug),
        body: String::new(),
        draft: false,
    }
}
