//! Key binding parsing and matching.

use crate::error::{Error, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

/// A parsed key binding such as `"q"`, `"Enter"` or `"Ctrl+r"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Whether `event` triggers this binding. Letters match either case.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let modifiers = event.modifiers - KeyModifiers::SHIFT;
        if modifiers != self.modifiers - KeyModifiers::SHIFT {
            return false;
        }

        match (self.code, event.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                expected == actual || expected.to_ascii_uppercase() == actual
            }
            (expected, actual) => expected == actual,
        }
    }
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(binding: &str) -> Result<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut code = None;

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                key => code = Some(parse_key(key, part)?),
            }
        }

        let code = code.ok_or_else(|| Error::config(format!("Key binding '{}' has no key", binding)))?;
        Ok(Self { code, modifiers })
    }
}

fn parse_key(lower: &str, original: &str) -> Result<KeyCode> {
    let code = match lower {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        s if s.len() > 1 && s.starts_with('f') => s[1..]
            .parse::<u8>()
            .map(KeyCode::F)
            .map_err(|_| Error::config(format!("Unknown key '{}'", original)))?,
        _ => {
            let mut chars = original.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(Error::config(format!("Unknown key '{}'", original))),
            }
        }
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_char() {
        let binding: KeyBinding = "q".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(binding.matches(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(!binding.matches(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_symbol_with_shift() {
        let binding: KeyBinding = "?".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_named_keys_and_modifiers() {
        let enter: KeyBinding = "Enter".parse().unwrap();
        assert!(enter.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));

        let ctrl_r: KeyBinding = "Ctrl+r".parse().unwrap();
        assert!(ctrl_r.matches(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!ctrl_r.matches(&key(KeyCode::Char('r'), KeyModifiers::NONE)));

        let f5: KeyBinding = "F5".parse().unwrap();
        assert!(f5.matches(&key(KeyCode::F(5), KeyModifiers::NONE)));
    }

    #[test]
    fn test_invalid_bindings() {
        assert!("Ctrl+".parse::<KeyBinding>().is_err());
        assert!("Hyper".parse::<KeyBinding>().is_err());
        assert!("Fx".parse::<KeyBinding>().is_err());
    }
}
