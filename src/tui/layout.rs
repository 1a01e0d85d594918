use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::config::Palette;
use crate::domain::Article;
use crate::feed::FeedState;
use crate::tui::app::{TuiApp, View};

/// Everything the renderer needs from the feed and the preferences for one
/// frame.
pub struct Screen<'a> {
    pub article: Option<&'a Article>,
    pub feed_state: &'a FeedState,
    /// 1-based cursor position and loaded length.
    pub position: (usize, usize),
    pub refilling: bool,
    pub bookmarked: bool,
    pub liked: bool,
    pub palette: &'a Palette,
}

pub fn render(frame: &mut Frame, app: &TuiApp, screen: &Screen) {
    let palette = screen.palette;
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Card
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let card_area = centered(chunks[0], 80);
    match (screen.article, app.view) {
        (Some(article), View::Card) => render_card(frame, article, screen, card_area),
        (Some(article), View::Detail) => {
            render_detail(frame, article, screen, app.detail_scroll, card_area)
        }
        (None, _) => render_placeholder(frame, screen, card_area),
    }

    render_status_bar(frame, app, screen, chunks[1]);
}

/// Horizontally center a column at most `max_width` wide.
fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn card_block<'a>(screen: &Screen, title: &'a str) -> Block<'a> {
    let palette = screen.palette;
    let (n, len) = screen.position;
    let mut position = format!(" {}/{} ", n, len);
    if screen.refilling {
        position.push_str("… ");
    }

    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(position).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.background))
}

fn markers(screen: &Screen) -> Line<'static> {
    let palette = screen.palette;
    let mut spans = Vec::new();
    if screen.bookmarked {
        spans.push(Span::styled("★ Saved  ", Style::default().fg(palette.bookmark)));
    }
    if screen.liked {
        spans.push(Span::styled("♥ Liked", Style::default().fg(palette.like)));
    }
    Line::from(spans)
}

fn thumbnail_line(article: &Article, screen: &Screen) -> Option<Line<'static>> {
    let thumbnail = article.thumbnail.as_ref()?;
    Some(Line::from(Span::styled(
        format!("[image {}×{}] {}", thumbnail.width, thumbnail.height, thumbnail.url),
        Style::default().fg(screen.palette.muted),
    )))
}

fn render_card(frame: &mut Frame, article: &Article, screen: &Screen, area: Rect) {
    let palette = screen.palette;
    let mut lines = Vec::new();

    if let Some(line) = thumbnail_line(article, screen) {
        lines.push(line);
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        article.display_title().to_string(),
        Style::default()
            .fg(palette.title)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let preview = preview(&article.extract, 600);
    lines.push(Line::from(Span::styled(
        preview,
        Style::default().fg(palette.text),
    )));
    lines.push(Line::from(""));
    lines.push(markers(screen));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(card_block(screen, "brainr"))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_detail(frame: &mut Frame, article: &Article, screen: &Screen, scroll: u16, area: Rect) {
    let palette = screen.palette;
    let mut lines = Vec::new();

    if let Some(line) = thumbnail_line(article, screen) {
        lines.push(line);
    }
    lines.push(Line::from(Span::styled(
        format!("Link: {}", article.link()),
        Style::default().fg(palette.link),
    )));
    lines.push(markers(screen));
    lines.push(Line::from(""));

    for paragraph in article.extract.split('\n') {
        lines.push(Line::from(Span::styled(
            paragraph.to_string(),
            Style::default().fg(palette.text),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(card_block(screen, article.display_title()))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_placeholder(frame: &mut Frame, screen: &Screen, area: Rect) {
    let palette = screen.palette;
    let message = match screen.feed_state {
        FeedState::Empty | FeedState::Loading | FeedState::Ready => {
            "Loading articles...".to_string()
        }
        FeedState::Exhausted => "You've reached the end.\n\nPress r to load more.".to_string(),
        FeedState::Failed(e) => format!("{}\n\nPress r to retry.", e),
    };

    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.text))
        .block(card_block(screen, "brainr"))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, screen: &Screen, area: Rect) {
    let palette = screen.palette;
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.view {
            View::Card => "j:Next  k:Prev  Enter:Read  b:Save  l:Like  o:Open  t:Theme  q:Quit",
            View::Detail => "j/k:Scroll  Esc:Back  b:Save  l:Like  o:Open  q:Quit",
        }
        .to_string()
    };

    let paragraph = Paragraph::new(status)
        .style(Style::default().fg(palette.status_fg).bg(palette.status_bg));

    frame.render_widget(paragraph, area);
}

/// Cut `text` to at most `max_chars` characters on a word boundary.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(space) => &cut[..space],
        None => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::image_article;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &TuiApp, screen: &Screen) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app, screen)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("A short extract.", 100), "A short extract.");
    }

    #[test]
    fn test_preview_cuts_on_word_boundary() {
        assert_eq!(preview("alpha beta gamma", 12), "alpha beta…");
    }

    #[test]
    fn test_card_shows_title_position_and_markers() {
        let article = image_article(5);
        let palette = Palette::dark();
        let screen = Screen {
            article: Some(&article),
            feed_state: &FeedState::Ready,
            position: (3, 10),
            refilling: false,
            bookmarked: true,
            liked: false,
            palette: &palette,
        };

        let out = draw(&TuiApp::new(), &screen);
        assert!(out.contains("Article 5"));
        assert!(out.contains("3/10"));
        assert!(out.contains("Saved"));
        assert!(!out.contains("Liked"));
    }

    #[test]
    fn test_failed_feed_offers_retry() {
        let palette = Palette::light();
        let state = FeedState::Failed(crate::app::FeedError::EmptyResult);
        let screen = Screen {
            article: None,
            feed_state: &state,
            position: (0, 0),
            refilling: false,
            bookmarked: false,
            liked: false,
            palette: &palette,
        };

        let out = draw(&TuiApp::new(), &screen);
        assert!(out.contains("Press r to retry."));
    }
}
