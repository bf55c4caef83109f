use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{mode::RendererMode, theme::Theme, widget::Widget};

/// Diagnostic recorded when a block or element rendered degraded or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderWarning {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Widget tree produced by one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSurface {
    pub mode: RendererMode,
    pub theme: Theme,
    pub widgets: Vec<Widget>,
    pub warnings: Vec<RenderWarning>,
}

impl RenderedSurface {
    /// Indented one-line-per-widget outline of the tree.
    pub fn outline(&self) -> String {
        self.to_string()
    }

    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}

impl fmt::Display for RenderedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.widgets.iter().try_for_each(|widget| write!(f, "{widget}"))
    }
}
