//! Card colors for the dark and light themes.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

use crate::domain::Theme;

/// Colors used to draw an article card and the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub link: Color,
    pub bookmark: Color,
    pub like: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            border: Color::Cyan,
            title: Color::White,
            text: Color::Gray,
            muted: Color::DarkGray,
            link: Color::LightBlue,
            bookmark: Color::Yellow,
            like: Color::LightRed,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            border: Color::Blue,
            title: Color::Black,
            text: Color::Black,
            muted: Color::Gray,
            link: Color::Blue,
            bookmark: Color::Rgb(0xb5, 0x89, 0x00),
            like: Color::Red,
            status_fg: Color::Black,
            status_bg: Color::Gray,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// One palette per theme.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_dark")]
    pub dark: Palette,
    #[serde(deserialize_with = "deserialize_light")]
    pub light: Palette,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            dark: Palette::dark(),
            light: Palette::light(),
        }
    }
}

impl ColorConfig {
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }
}

/// Keys missing from a `[colors.*]` table keep that theme's own defaults.
fn deserialize_dark<'de, D>(deserializer: D) -> Result<Palette, D::Error>
where
    D: Deserializer<'de>,
{
    overlay(Palette::dark(), deserializer)
}

fn deserialize_light<'de, D>(deserializer: D) -> Result<Palette, D::Error>
where
    D: Deserializer<'de>,
{
    overlay(Palette::light(), deserializer)
}

fn overlay<'de, D>(mut base: Palette, deserializer: D) -> Result<Palette, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = std::collections::HashMap::<String, String>::deserialize(deserializer)?;
    for (key, value) in entries {
        let color = parse_color_string(&value).map_err(de::Error::custom)?;
        let slot = match key.as_str() {
            "background" => &mut base.background,
            "border" => &mut base.border,
            "title" => &mut base.title,
            "text" => &mut base.text,
            "muted" => &mut base.muted,
            "link" => &mut base.link,
            "bookmark" => &mut base.bookmark,
            "like" => &mut base.like,
            "status_fg" => &mut base.status_fg,
            "status_bg" => &mut base.status_bg,
            other => return Err(de::Error::custom(format!("Unknown color key: {}", other))),
        };
        *slot = color;
    }
    Ok(base)
}

/// Parse a named color ("Cyan", "darkgray") or a hex color ("#RRGGBB",
/// "#RGB").
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    let color = match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        _ => return Err(format!("Unknown color: {}", s)),
    };
    Ok(color)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit, so F becomes FF.
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}
