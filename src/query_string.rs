use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_default();

        QueryString {
            items: vs.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Requested page, 1 when absent or not a positive number.
    pub fn get_page(&self) -> u32 {
        match self.get("page").and_then(|p| p.parse::<u32>().ok()) {
            Some(page) if page > 0 => page,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("tag=rust&page=2").get_page(), 2);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=-4").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
        assert_eq!(QueryString::from("").get_page(), 1);
    }

    #[test]
    fn test_parse_query_str() {
        let qs = QueryString::from("tag=%EB%9F%AC%EC%8A%A4%ED%8A%B8&page=1");
        assert_eq!(qs.get("tag"), Some("러스트"));
        assert_eq!(qs.get("missing"), None);
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let qs = QueryString::from("key-only");
        assert_eq!(qs.get("key-only"), Some(""));
    }
}
