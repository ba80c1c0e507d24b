/// Slug used in tag URLs: lowercased, whitespace turned into `-`, punctuation dropped.
/// Letters outside ASCII are kept, so `러스트` stays `러스트`.
pub fn tag_slug(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    for c in tag.trim().chars() {
        if c.is_whitespace() {
            slug.push('-');
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.extend(c.to_lowercase());
        }
    }
    slug
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLink {
    pub label: String,
    pub href: String,
}

impl TagLink {
    pub fn from(tag: &str) -> Self {
        TagLink {
            label: tag.to_string(),
            href: format!("/tags/{}/", tag_slug(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_slug() {
        assert_eq!(tag_slug("Hello World"), "hello-world");
        assert_eq!(tag_slug("rust"), "rust");
        assert_eq!(tag_slug("C++ & Rust!"), "c--rust");
        assert_eq!(tag_slug("next.js"), "nextjs");
        assert_eq!(tag_slug(" 러스트 공부 "), "러스트-공부");
    }

    #[test]
    fn test_tag_link() {
        let link = TagLink::from("Web Dev");
        assert_eq!(link.label, "Web Dev");
        assert_eq!(link.href, "/tags/web-dev/");
    }
}
