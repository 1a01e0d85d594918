use serde::{Deserialize, Serialize};

/// Base used to build a link when the API did not return a canonical URL.
pub const FALLBACK_LINK_BASE: &str = "https://en.wikipedia.org/?curid=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub canonical_url: Option<String>,
}

impl Article {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            extract: String::new(),
            thumbnail: None,
            canonical_url: None,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Link to the full page, falling back to the page-id URL.
    pub fn link(&self) -> String {
        match &self.canonical_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("{}{}", FALLBACK_LINK_BASE, self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_prefers_canonical_url() {
        let mut article = Article::new(42, "Octopus");
        article.canonical_url = Some("https://en.wikipedia.org/wiki/Octopus".into());
        assert_eq!(article.link(), "https://en.wikipedia.org/wiki/Octopus");
    }

    #[test]
    fn test_link_falls_back_to_curid() {
        let article = Article::new(42, "Octopus");
        assert_eq!(article.link(), "https://en.wikipedia.org/?curid=42");
    }

    #[test]
    fn test_display_title_without_title() {
        let article = Article::new(7, "");
        assert_eq!(article.display_title(), "(Untitled)");
    }

    #[test]
    fn test_deserialize_tolerates_missing_optional_fields() {
        let article: Article = serde_json::from_str(r#"{"id":1,"title":"Moon"}"#).unwrap();
        assert_eq!(article.extract, "");
        assert!(article.thumbnail.is_none());
        assert!(article.canonical_url.is_none());
    }
}
