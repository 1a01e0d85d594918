//! Keybinding configuration for the card view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub next: Vec<String>,
    pub previous: Vec<String>,
    pub open_detail: Vec<String>,
    pub back: Vec<String>,
    pub open_in_browser: Vec<String>,
    pub toggle_bookmark: Vec<String>,
    pub toggle_like: Vec<String>,
    pub toggle_theme: Vec<String>,
    pub retry: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            next: keys(&["j", "Down", "Left"]),
            previous: keys(&["k", "Up"]),
            open_detail: keys(&["Enter", "Right"]),
            back: keys(&["Esc", "Backspace"]),
            open_in_browser: keys(&["o"]),
            toggle_bookmark: keys(&["b"]),
            toggle_like: keys(&["l"]),
            toggle_theme: keys(&["t"]),
            retry: keys(&["r"]),
        }
    }
}

impl KeybindingConfig {
    /// Parse every binding into a [`Keymap`]. Fails on the first key string
    /// that cannot be parsed, naming the action it belongs to.
    pub fn keymap(&self) -> Result<Keymap, String> {
        let table: [(&str, &[String], Action); 10] = [
            ("quit", &self.quit, Action::Quit),
            ("next", &self.next, Action::Next),
            ("previous", &self.previous, Action::Previous),
            ("open_detail", &self.open_detail, Action::OpenDetail),
            ("back", &self.back, Action::Back),
            ("open_in_browser", &self.open_in_browser, Action::OpenInBrowser),
            ("toggle_bookmark", &self.toggle_bookmark, Action::ToggleBookmark),
            ("toggle_like", &self.toggle_like, Action::ToggleLike),
            ("toggle_theme", &self.toggle_theme, Action::ToggleTheme),
            ("retry", &self.retry, Action::Retry),
        ];

        let mut bindings = Vec::new();
        for (name, keys, action) in table {
            for key in keys {
                let binding = parse_key_string(key)
                    .map_err(|e| format!("keybindings.{}: {}", name, e))?;
                bindings.push((binding, action));
            }
        }
        Ok(Keymap { bindings })
    }
}

/// Parsed keybindings, built once when the config is loaded.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, Action)>,
}

impl Keymap {
    /// Map a key press to an action. The first matching binding wins, in
    /// the order the config fields are declared.
    pub fn action(&self, key: &KeyEvent) -> Action {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored when the binding does not ask for it, since
    /// terminals report it for uppercase characters.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse "b", "Esc", "F5" or "Ctrl+Shift+n" style key strings.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (prefix, key) = match s.rsplit_once('+') {
        Some((prefix, key)) if !key.is_empty() => (Some(prefix), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.into_iter().flat_map(|p| p.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        name => name
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_single_char() {
        let binding = parse_key_string("b").unwrap();
        assert_eq!(binding.code, KeyCode::Char('b'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("Esc").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("right").unwrap().code, KeyCode::Right);
        assert_eq!(parse_key_string("F5").unwrap().code, KeyCode::F(5));
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+Shift+n").unwrap();
        assert_eq!(binding.code, KeyCode::Char('n'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);

        assert!(parse_key_string("Hyper+x").is_err());
        assert!(parse_key_string("Banana").is_err());
    }

    #[test]
    fn test_ctrl_binding_requires_modifier() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert!(binding.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&press(KeyCode::Char('c'))));
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default().keymap().unwrap();

        assert_eq!(config.action(&press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(config.action(&press(KeyCode::Char('j'))), Action::Next);
        assert_eq!(config.action(&press(KeyCode::Left)), Action::Next);
        assert_eq!(config.action(&press(KeyCode::Up)), Action::Previous);
        assert_eq!(config.action(&press(KeyCode::Right)), Action::OpenDetail);
        assert_eq!(config.action(&press(KeyCode::Esc)), Action::Back);
        assert_eq!(config.action(&press(KeyCode::Char('b'))), Action::ToggleBookmark);
        assert_eq!(config.action(&press(KeyCode::Char('l'))), Action::ToggleLike);
        assert_eq!(config.action(&press(KeyCode::Char('r'))), Action::Retry);
        assert_eq!(config.action(&press(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_custom_bindings_override_defaults() {
        let config: KeybindingConfig = toml::from_str("next = [\"n\"]\n").unwrap();
        let config = config.keymap().unwrap();
        assert_eq!(config.action(&press(KeyCode::Char('n'))), Action::Next);
        assert_eq!(config.action(&press(KeyCode::Char('j'))), Action::None);
        assert_eq!(config.action(&press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_bad_binding_is_reported_when_building_keymap() {
        let config: KeybindingConfig =
            toml::from_str("toggle_like = [\"l\", \"Hyper+l\"]\n").unwrap();
        let err = config.keymap().unwrap_err();
        assert!(err.contains("keybindings.toggle_like"));
        assert!(err.contains("Hyper"));
    }
}
