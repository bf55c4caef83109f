//! Visual themes and the ambient provider handlers read them from.
//!
//! A theme is an opaque identifier as far as the engine is concerned; it is
//! only resolved to a [`Palette`] where a handler needs a concrete color
//! (secondary text inside context rows, for instance).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Black,
}

/// Colors a renderer may pick from. Values are `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub body_text: &'static str,
    pub auxiliary_text: &'static str,
    pub separator: &'static str,
    pub background: &'static str,
    pub tint: &'static str,
}

const LIGHT: Palette = Palette {
    body_text: "#2f343d",
    auxiliary_text: "#9ca2a8",
    separator: "#cbcbcc",
    background: "#ffffff",
    tint: "#1d74f5",
};

const DARK: Palette = Palette {
    body_text: "#e8ebed",
    auxiliary_text: "#9297a2",
    separator: "#2b2b2d",
    background: "#030b1b",
    tint: "#1d74f5",
};

const BLACK: Palette = Palette {
    body_text: "#e8ebed",
    auxiliary_text: "#b2b8c6",
    separator: "#272728",
    background: "#000000",
    tint: "#1e9bfe",
};

impl Theme {
    /// Parse a theme identifier (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "black" => Some(Self::Black),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Black => "black",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
            Self::Black => &BLACK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only accessor for the active theme. Hosts own the value and change
/// it between render passes; the engine only ever calls [`ThemeProvider::theme`].
pub trait ThemeProvider {
    fn theme(&self) -> Theme;
}

impl ThemeProvider for Theme {
    fn theme(&self) -> Theme {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_identifiers() {
        assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("black"), Some(Theme::Black));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn auxiliary_text_differs_from_body_text() {
        for theme in [Theme::Light, Theme::Dark, Theme::Black] {
            let palette = theme.palette();
            assert_ne!(palette.auxiliary_text, palette.body_text, "{theme}");
        }
    }
}
