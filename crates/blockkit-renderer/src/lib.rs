//! Block kit dispatch and rendering engine.
//!
//! Turns a block kit document into a tree of widget descriptors for either
//! a message surface or a modal surface, threading the host's theme,
//! interaction state and action channel into every handler explicitly.
//! The modal variant reuses every message handler it does not redefine.

pub mod config;
pub mod context;
pub mod errors;
pub mod kit;
mod message;
mod modal;
pub mod mode;
pub mod model;
pub mod parser;
pub mod pass;
pub mod state;
pub mod surface;
pub mod theme;
pub mod widget;

pub use config::RendererConfig;
pub use context::BlockContext;
pub use errors::RendererError;
pub use kit::{BlockKit, MESSAGE_PARSER, MODAL_PARSER, RenderEnv, render_surface, ui_kit_message, ui_kit_modal};
pub use modal::MULTILINE_MIN_HEIGHT;
pub use mode::RendererMode;
pub use model::{Block, Document, Element, ElementIdentity, ElementKind, TextKind, TextObject};
pub use parser::{Handler, HandlerTable, Parser, Slot};
pub use pass::RenderPass;
pub use state::{
    ActionBinding, ActionDispatcher, ActionKind, ActionPayload, ActionSink, InteractionState,
    InteractionStore, MemoryInteractionStore, StateKey, UiAction,
};
pub use surface::{RenderWarning, RenderedSurface};
pub use theme::{Palette, Theme, ThemeProvider};
pub use widget::Widget;
