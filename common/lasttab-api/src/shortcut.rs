//! Keyboard shortcut strings, in the WebExtension `commands` format.
use regex::Regex;
use std::{fmt::Display, str::FromStr, sync::OnceLock};
use thiserror::Error;

pub const DEFAULT_SHORTCUT: &str = "Ctrl+Shift+1";

static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn patterns() -> &'static [Regex] {
    PATTERNS.get_or_init(|| {
        [
            // a modifier, an optional shift, and a key
            r"^\s*(Alt|Ctrl|Command|MacCtrl)\s*\+\s*(Shift\s*\+\s*)?([A-Z0-9]|Comma|Period|Home|End|PageUp|PageDown|Space|Insert|Delete|Up|Down|Left|Right)\s*$",
            // function keys may be bound bare
            r"^\s*((Alt|Ctrl|Command|MacCtrl)\s*\+\s*)?(Shift\s*\+\s*)?(F[1-9]|F1[0-2])\s*$",
            r"^(MediaNextTrack|MediaPlayPause|MediaPrevTrack|MediaStop)$",
        ]
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
    })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid shortcut: '{0}'")]
pub struct ShortcutError(pub String);

/// A validated shortcut, such as `Ctrl+Shift+1` or `Alt+F4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut(String);

impl Shortcut {
    pub fn parse(candidate: &str) -> Result<Self, ShortcutError> {
        if is_valid(candidate) {
            Ok(Shortcut(candidate.to_string()))
        } else {
            Err(ShortcutError(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Shortcut(DEFAULT_SHORTCUT.to_string())
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shortcut::parse(s)
    }
}

impl Display for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

pub fn is_valid(candidate: &str) -> bool {
    patterns().iter().any(|pattern| pattern.is_match(candidate))
}
