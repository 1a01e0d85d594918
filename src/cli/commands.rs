use crate::app::{AppContext, BrainrError, Result};
use crate::domain::{Theme, TopicId};
use crate::source::catalog::{default_catalog, find_topic};

use super::ThemeArg;

/// Print `count` articles from the feed, following the stored topics.
pub async fn print_feed(ctx: &AppContext, count: usize) -> Result<()> {
    let mut buffer = ctx.feed_buffer();
    buffer.initialize(ctx.prefs.topics()).await?;

    let mut printed = 0;
    while printed < count {
        let Some(article) = buffer.current() else {
            break;
        };
        println!("{:>10}  {}", article.id, article.display_title());
        if !article.extract.is_empty() {
            println!("            {}", first_sentence(&article.extract));
        }
        println!("            {}", article.link());
        printed += 1;

        if printed < count && !buffer.advance().await {
            break;
        }
    }

    if printed < count {
        println!("\nOnly {} articles were available", printed);
    }
    Ok(())
}

pub fn list_topics(ctx: &AppContext) -> Result<()> {
    let followed = ctx.prefs.topics();
    for topic in ctx.source.fetch_topic_catalog() {
        let marker = if followed.contains(&topic.id) { "*" } else { " " };
        println!("{} {} {}", marker, topic.icon, topic.name);
    }
    if followed.is_empty() {
        println!("\nNo topics followed; the feed shows random articles");
    }
    Ok(())
}

pub fn set_topics(ctx: &AppContext, names: &[String]) -> Result<()> {
    let topics = resolve_topics(names)?;
    ctx.prefs.set_topics(&topics)?;
    println!("Following: {}", topics.join(", "));
    Ok(())
}

pub fn clear_topics(ctx: &AppContext) -> Result<()> {
    ctx.prefs.set_topics(&[])?;
    println!("Cleared topics; the feed shows random articles");
    Ok(())
}

pub fn list_bookmarks(ctx: &AppContext) -> Result<()> {
    let bookmarks = ctx.prefs.bookmarks();
    if bookmarks.is_empty() {
        println!("No bookmarks");
        return Ok(());
    }

    for bookmark in bookmarks {
        println!(
            "{:>10}  {}  {}",
            bookmark.id(),
            bookmark.saved_at.format("%Y-%m-%d"),
            bookmark.article.display_title()
        );
    }
    Ok(())
}

pub fn remove_bookmark(ctx: &AppContext, id: u64) -> Result<()> {
    ctx.prefs.remove_bookmark(id)?;
    println!("Removed bookmark {}", id);
    Ok(())
}

pub fn list_liked(ctx: &AppContext) -> Result<()> {
    let liked = ctx.prefs.liked_articles();
    if liked.is_empty() {
        println!("No liked articles");
        return Ok(());
    }

    for article in liked {
        println!(
            "{:>10}  {}  {}",
            article.id,
            article.liked_at.format("%Y-%m-%d"),
            article.title
        );
    }
    Ok(())
}

pub fn theme(ctx: &AppContext, mode: Option<ThemeArg>) -> Result<Theme> {
    let theme = match mode {
        None => ctx.prefs.theme(),
        Some(ThemeArg::Toggle) => ctx.prefs.toggle_theme()?,
        Some(ThemeArg::Dark) => {
            ctx.prefs.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        Some(ThemeArg::Light) => {
            ctx.prefs.set_theme(Theme::Light)?;
            Theme::Light
        }
    };
    println!("Theme: {}", theme);
    Ok(theme)
}

pub fn onboard(ctx: &AppContext, names: &[String]) -> Result<()> {
    if names.is_empty() {
        println!("Available topics:");
        for topic in default_catalog() {
            println!("  {} {}", topic.icon, topic.name);
        }
        println!("\nRun `brainr onboard --topics <TOPIC>...` to follow some, or browse without any.");
    } else {
        let topics = resolve_topics(names)?;
        ctx.prefs.set_topics(&topics)?;
        println!("Following: {}", topics.join(", "));
    }

    ctx.prefs.complete_onboarding()?;
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, limit: usize) -> Result<()> {
    let hits = ctx.source.search(query, limit).await?;
    if hits.is_empty() {
        println!("No results for {:?}", query);
        return Ok(());
    }

    for hit in hits {
        println!("{:>10}  {}", hit.id, hit.title);
        if !hit.snippet.is_empty() {
            println!("            {}", hit.snippet);
        }
    }
    Ok(())
}

pub fn reset(ctx: &AppContext) -> Result<()> {
    ctx.prefs.clear_all()?;
    println!("Cleared all preferences");
    Ok(())
}

/// Map user-typed names onto catalog topic ids.
fn resolve_topics(names: &[String]) -> Result<Vec<TopicId>> {
    names
        .iter()
        .map(|name| {
            find_topic(name)
                .map(|topic| topic.id)
                .ok_or_else(|| BrainrError::UnknownTopic(name.clone()))
        })
        .collect()
}

fn first_sentence(text: &str) -> &str {
    match text.find(". ") {
        Some(end) => &text[..=end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn context() -> AppContext {
        AppContext::in_memory(Config::default()).unwrap()
    }

    #[test]
    fn test_resolve_topics_uses_catalog_names() {
        let topics = resolve_topics(&["science".into(), "FILM".into()]).unwrap();
        assert_eq!(topics, vec!["Science", "Film"]);
    }

    #[test]
    fn test_resolve_topics_rejects_unknown() {
        let err = resolve_topics(&["Science".into(), "Astrology".into()]).unwrap_err();
        assert!(matches!(err, BrainrError::UnknownTopic(name) if name == "Astrology"));
    }

    #[test]
    fn test_theme_command() {
        let ctx = context();
        assert_eq!(theme(&ctx, None).unwrap(), Theme::Dark);
        assert_eq!(theme(&ctx, Some(ThemeArg::Toggle)).unwrap(), Theme::Light);
        assert_eq!(theme(&ctx, Some(ThemeArg::Dark)).unwrap(), Theme::Dark);
        assert_eq!(ctx.prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_onboard_saves_topics_and_flag() {
        let ctx = context();
        onboard(&ctx, &["history".into()]).unwrap();

        assert_eq!(ctx.prefs.topics(), vec!["History"]);
        assert!(ctx.prefs.onboarding_completed());
    }

    #[test]
    fn test_onboard_with_unknown_topic_changes_nothing() {
        let ctx = context();
        assert!(onboard(&ctx, &["Nope".into()]).is_err());
        assert!(ctx.prefs.topics().is_empty());
        assert!(!ctx.prefs.onboarding_completed());
    }

    #[test]
    fn test_reset_clears_preferences() {
        let ctx = context();
        set_topics(&ctx, &["Music".into()]).unwrap();
        ctx.prefs.complete_onboarding().unwrap();

        reset(&ctx).unwrap();
        assert!(ctx.prefs.topics().is_empty());
        assert!(!ctx.prefs.onboarding_completed());
    }

    #[test]
    fn test_remove_missing_bookmark_reports_error() {
        let ctx = context();
        assert!(matches!(
            remove_bookmark(&ctx, 42),
            Err(BrainrError::BookmarkNotFound(42))
        ));
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("One. Two. Three."), "One.");
        assert_eq!(first_sentence("No stop"), "No stop");
    }
}
