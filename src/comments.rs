use serde::Deserialize;

use crate::post::Post;

pub const GISCUS_CLIENT: &str = "https://giscus.app/client.js";

/// Which value of a post keys its discussion thread.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommentMapping {
    #[default]
    Title,
    Pathname,
    Slug,
}

/// Per deployment settings of the giscus comment widget.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CommentConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    #[serde(default)]
    pub mapping: CommentMapping,
    #[serde(default)]
    pub reactions_enabled: bool,
    #[serde(default)]
    pub emit_metadata: bool,
    #[serde(default = "default_input_position")]
    pub input_position: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_true")]
    pub lazy: bool,
}

fn default_true() -> bool { true }

fn default_input_position() -> String { "top".to_string() }

fn default_theme() -> String { "light".to_string() }

fn default_lang() -> String { "ko".to_string() }

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetAttribute {
    pub name: &'static str,
    pub value: String,
}

/// What the page needs to mount the widget: the thread key and the
/// `data-*` attributes of the client script. Loading and rendering
/// comments is left to the widget itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentActivation {
    pub key: String,
    pub script_src: &'static str,
    pub attributes: Vec<WidgetAttribute>,
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

pub fn thread_key(mapping: CommentMapping, post: &Post) -> String {
    match mapping {
        CommentMapping::Title => post.title.clone(),
        CommentMapping::Pathname => format!("/{}", post.path),
        CommentMapping::Slug => post.slug.clone(),
    }
}

/// Returns `None` when comments are not configured or turned off.
pub fn activate(config: Option<&CommentConfig>, post: &Post) -> Option<CommentActivation> {
    let config = config.filter(|c| c.enabled)?;
    let key = thread_key(config.mapping, post);

    let attr = |name: &'static str, value: String| WidgetAttribute { name, value };
    let mut attributes = vec![
        attr("data-repo", config.repo.clone()),
        attr("data-repo-id", config.repo_id.clone()),
        attr("data-category", config.category.clone()),
        attr("data-category-id", config.category_id.clone()),
        // The key is computed here, so the widget is told to use it verbatim
        attr("data-mapping", "specific".to_string()),
        attr("data-term", key.clone()),
        attr("data-reactions-enabled", flag(config.reactions_enabled)),
        attr("data-emit-metadata", flag(config.emit_metadata)),
        attr("data-input-position", config.input_position.clone()),
        attr("data-theme", config.theme.clone()),
        attr("data-lang", config.lang.clone()),
    ];
    if config.lazy {
        attributes.push(attr("data-loading", "lazy".to_string()));
    }

    Some(CommentActivation {
        key,
        script_src: GISCUS_CLIENT,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_data::make_post;

    use super::*;

    fn config() -> CommentConfig {
        toml::from_str(r#"
repo = "someone/blog"
repo_id = "R_repo"
category = "Announcements"
category_id = "DIC_category"
"#).unwrap()
    }

    fn value<'a>(activation: &'a CommentActivation, name: &str) -> Option<&'a str> {
        activation.attributes.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    #[test]
    fn test_defaults() {
        let cfg = config();
        assert!(cfg.enabled);
        assert!(cfg.lazy);
        assert_eq!(cfg.mapping, CommentMapping::Title);
        assert_eq!(cfg.theme, "light");
        assert_eq!(cfg.lang, "ko");
        assert_eq!(cfg.input_position, "top");
    }

    #[test]
    fn test_not_configured() {
        let post = make_post("a", "2024-01-01");
        assert_eq!(activate(None, &post), None);
    }

    #[test]
    fn test_disabled() {
        let post = make_post("a", "2024-01-01");
        let cfg = CommentConfig { enabled: false, ..config() };
        assert_eq!(activate(Some(&cfg), &post), None);
    }

    #[test]
    fn test_keyed_by_title() {
        let post = make_post("a", "2024-01-01");
        let activation = activate(Some(&config()), &post).unwrap();
        assert_eq!(activation.key, "Title of a");
        assert_eq!(value(&activation, "data-term"), Some("Title of a"));
        assert_eq!(value(&activation, "data-mapping"), Some("specific"));
        assert_eq!(value(&activation, "data-reactions-enabled"), Some("0"));
        assert_eq!(value(&activation, "data-loading"), Some("lazy"));
        assert_eq!(activation.script_src, GISCUS_CLIENT);
    }

    #[test]
    fn test_other_mappings() {
        let post = make_post("a", "2024-01-01");
        assert_eq!(thread_key(CommentMapping::Slug, &post), "a");
        assert_eq!(thread_key(CommentMapping::Pathname, &post), "/blog/a");
    }

    #[test]
    fn test_eager_loading() {
        let post = make_post("a", "2024-01-01");
        let cfg = CommentConfig { lazy: false, ..config() };
        let activation = activate(Some(&cfg), &post).unwrap();
        assert_eq!(value(&activation, "data-loading"), None);
    }
}
