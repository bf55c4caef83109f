use std::fmt;

use serde::{Deserialize, Serialize};

/// Renderer variant switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererMode {
    #[default]
    Message,
    Modal,
}

impl RendererMode {
    /// Parse a renderer mode string (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "message" | "msg" => Some(Self::Message),
            "modal" | "form" => Some(Self::Modal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Modal => "modal",
        }
    }
}

impl fmt::Display for RendererMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RendererMode::parse(" Modal "), Some(RendererMode::Modal));
        assert_eq!(RendererMode::parse("MESSAGE"), Some(RendererMode::Message));
        assert_eq!(RendererMode::parse("sheet"), None);
    }
}
