//! Entry points: render a document as a message or as a modal.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug_span;

use crate::{
    config::RendererConfig,
    errors::RendererError,
    mode::RendererMode,
    model::Document,
    parser::Parser,
    pass::RenderPass,
    state::{ActionSink, InteractionState, InteractionStore, StateKey},
    surface::RenderedSurface,
    theme::{Theme, ThemeProvider},
};

/// Process-wide message variant.
pub static MESSAGE_PARSER: Lazy<Parser> = Lazy::new(Parser::message);

/// Process-wide modal variant, composed once from [`MESSAGE_PARSER`].
pub static MODAL_PARSER: Lazy<Parser> = Lazy::new(|| Parser::modal(&MESSAGE_PARSER));

/// Host capabilities threaded into every render pass. Each one may be
/// missing while the host is still starting up; rendering then falls back
/// to defaults.
#[derive(Clone, Default)]
pub struct RenderEnv {
    theme: Option<Arc<dyn ThemeProvider>>,
    store: Option<Arc<dyn InteractionStore>>,
    actions: Option<Arc<dyn ActionSink>>,
    app_id: Option<String>,
    view_id: Option<String>,
    config: RendererConfig,
}

impl RenderEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, provider: Arc<dyn ThemeProvider>) -> Self {
        self.theme = Some(provider);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn InteractionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_actions(mut self, sink: Arc<dyn ActionSink>) -> Self {
        self.actions = Some(sink);
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_view_id(mut self, view_id: impl Into<String>) -> Self {
        self.view_id = Some(view_id.into());
        self
    }

    pub fn with_config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Active theme, or the configured fallback without a provider.
    pub fn theme(&self) -> Theme {
        self.theme
            .as_ref()
            .map(|provider| provider.theme())
            .unwrap_or(self.config.fallback_theme)
    }

    pub fn lookup(&self, key: &StateKey) -> Option<InteractionState> {
        self.store.as_ref().and_then(|store| store.lookup(key))
    }

    pub fn action_sink(&self) -> Option<Arc<dyn ActionSink>> {
        self.actions.clone()
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }
}

/// Renders `document` with the message variant.
pub fn ui_kit_message(document: &Document, env: &RenderEnv) -> RenderedSurface {
    render_surface(&MESSAGE_PARSER, document, env)
}

/// Renders `document` with the modal variant.
pub fn ui_kit_modal(document: &Document, env: &RenderEnv) -> RenderedSurface {
    render_surface(&MODAL_PARSER, document, env)
}

/// Walks `document` depth first in document order with `parser`.
pub fn render_surface(parser: &Parser, document: &Document, env: &RenderEnv) -> RenderedSurface {
    let span = debug_span!(
        "render_surface",
        mode = %parser.mode(),
        blocks = document.blocks.len()
    );
    let _guard = span.enter();

    let pass = RenderPass::new(
        parser,
        env,
        document.app_id.as_deref(),
        document.view_id.as_deref(),
    );
    let limit = env
        .config()
        .max_blocks
        .map(|max| max as usize)
        .unwrap_or(usize::MAX);

    let mut widgets = Vec::with_capacity(document.blocks.len().min(limit));
    for (index, block) in document.blocks.iter().enumerate() {
        if index >= limit {
            pass.warn(
                "blocks_truncated",
                format!("dropped {} blocks over the limit of {limit}", document.blocks.len() - limit),
            );
            break;
        }
        pass.enter_block(index);
        if let Some(widget) = pass.render_block(block) {
            widgets.push(widget);
        }
        pass.leave_block();
    }

    RenderedSurface {
        mode: parser.mode(),
        theme: pass.theme(),
        widgets,
        warnings: pass.into_warnings(),
    }
}

/// Owns a validated config and renders raw JSON documents.
pub struct BlockKit {
    config: RendererConfig,
}

impl BlockKit {
    pub fn new() -> Self {
        Self {
            config: RendererConfig::default(),
        }
    }

    pub fn with_config(config: RendererConfig) -> Result<Self, RendererError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Decodes `document` and renders it in `mode`. The kit's config
    /// replaces the one on `env`.
    pub fn render(
        &self,
        mode: RendererMode,
        document: &Value,
        env: &RenderEnv,
    ) -> Result<RenderedSurface, RendererError> {
        let document = Document::from_value(document)?;
        let env = env.clone().with_config(self.config.clone());
        Ok(match mode {
            RendererMode::Message => ui_kit_message(&document, &env),
            RendererMode::Modal => ui_kit_modal(&document, &env),
        })
    }

    /// Like [`BlockKit::render`] with the mode given by name.
    pub fn render_named(
        &self,
        mode: &str,
        document: &Value,
        env: &RenderEnv,
    ) -> Result<RenderedSurface, RendererError> {
        let mode = RendererMode::parse(mode).ok_or_else(|| RendererError::UnknownMode(mode.to_owned()))?;
        self.render(mode, document, env)
    }
}

impl Default for BlockKit {
    fn default() -> Self {
        Self::new()
    }
}
