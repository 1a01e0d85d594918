use crate::domain::Topic;

const CATALOG: &[(&str, &str)] = &[
    ("Science", "🔬"),
    ("History", "📜"),
    ("Technology", "💻"),
    ("Art", "🎨"),
    ("Literature", "📚"),
    ("Sports", "⚽"),
    ("Geography", "🌍"),
    ("Music", "🎵"),
    ("Film", "🎬"),
    ("Food", "🍲"),
];

/// Static topic catalog. No network call is made.
pub fn default_catalog() -> Vec<Topic> {
    CATALOG
        .iter()
        .map(|(name, icon)| Topic::new(name, name, icon))
        .collect()
}

/// Resolve a user-typed topic name against the catalog, ignoring case.
pub fn find_topic(name: &str) -> Option<Topic> {
    let name = name.trim();
    default_catalog()
        .into_iter()
        .find(|topic| topic.id.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_unique_topics() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 10);

        let mut ids: Vec<_> = catalog.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_find_topic_is_case_insensitive() {
        assert_eq!(find_topic("science").unwrap().id, "Science");
        assert_eq!(find_topic("  FILM ").unwrap().id, "Film");
        assert!(find_topic("Astrology").is_none());
    }

    #[test]
    fn test_category_title() {
        let topic = find_topic("History").unwrap();
        assert_eq!(topic.category_title(), "Category:History");
    }
}
