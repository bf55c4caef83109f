//! One render pass over a document.
//!
//! A [`RenderPass`] is what every handler receives. It carries the active
//! parser (so containers dispatch children through the same variant), the
//! theme read once for the whole pass, a memo of interaction snapshots and
//! the warnings collected along the way.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::debug;

use crate::{
    context::BlockContext,
    kit::RenderEnv,
    mode::RendererMode,
    model::{Block, Element, ElementIdentity, TextObject},
    parser::{Parser, Slot},
    state::{ActionBinding, ActionDispatcher, ActionKind, InteractionState, StateKey},
    surface::RenderWarning,
    theme::{Palette, Theme},
    widget::Widget,
};

pub struct RenderPass<'a> {
    parser: &'a Parser,
    env: &'a RenderEnv,
    theme: Theme,
    app_id: Option<&'a str>,
    view_id: Option<&'a str>,
    block_index: Cell<Option<usize>>,
    snapshot: RefCell<HashMap<StateKey, InteractionState>>,
    warnings: RefCell<Vec<RenderWarning>>,
}

impl<'a> RenderPass<'a> {
    pub(crate) fn new(
        parser: &'a Parser,
        env: &'a RenderEnv,
        app_id: Option<&'a str>,
        view_id: Option<&'a str>,
    ) -> Self {
        Self {
            parser,
            env,
            theme: env.theme(),
            app_id: app_id.or(env.app_id()),
            view_id: view_id.or(env.view_id()),
            block_index: Cell::new(None),
            snapshot: RefCell::new(HashMap::new()),
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn mode(&self) -> RendererMode {
        self.parser.mode()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// Renders a top-level block.
    pub fn render_block(&self, block: &Block) -> Option<Widget> {
        let handlers = self.parser.handlers();
        let context = BlockContext::Block;
        match block {
            Block::Divider(block) => self.call(handlers.divider, "divider", block, context),
            Block::Section(block) => self.call(handlers.section, "section", block, context),
            Block::Actions(block) => self.call(handlers.actions, "actions", block, context),
            Block::Context(block) => self.call(handlers.context, "context", block, context),
            Block::Image(block) => self.call(handlers.image, "image", block, context),
            Block::Input(block) => self.call(handlers.input, "input", block, context),
            Block::Malformed(kind) => {
                debug!(mode = %self.mode(), kind = %kind, "skipping malformed block");
                self.warn("malformed_block", format!("{kind} block could not be decoded"));
                None
            }
            Block::Unsupported => {
                debug!(mode = %self.mode(), "skipping unsupported block");
                self.warn("unsupported_block", "block type is not supported");
                None
            }
        }
    }

    /// Renders an element nested in `context`, through the active parser.
    pub fn render_element(&self, element: &Element, context: BlockContext) -> Option<Widget> {
        if let Element::Malformed(kind) = element {
            debug!(mode = %self.mode(), ?context, kind = %kind, "skipping malformed element");
            self.warn("malformed_element", format!("{kind} element could not be decoded"));
            return None;
        }
        if matches!(element, Element::Unsupported) {
            debug!(mode = %self.mode(), ?context, "skipping unsupported element");
            self.warn("unsupported_element", "element type is not supported");
            return None;
        }
        let kind = element.kind();
        if !context.accepts(kind) {
            self.warn(
                "element_not_allowed",
                format!("{} is not allowed in {context:?}", kind.as_str()),
            );
            return None;
        }

        let handlers = self.parser.handlers();
        match element {
            Element::Button(el) => self.call(handlers.button, "button", el, context),
            Element::Image(el) => self.call(handlers.image, "image", el, context),
            Element::PlainText(_) | Element::Mrkdwn(_) => {
                let text = element.as_text()?;
                self.call(handlers.text, "text", &text, context)
            }
            Element::Overflow(el) => self.call(handlers.overflow, "overflow", el, context),
            Element::DatePicker(el) => self.call(handlers.date_picker, "date_picker", el, context),
            Element::StaticSelect(el) => {
                self.call(handlers.static_select, "static_select", el, context)
            }
            Element::MultiStaticSelect(el) => {
                self.call(handlers.multi_static_select, "multi_static_select", el, context)
            }
            Element::SelectInput(el) => self.call(handlers.select_input, "select_input", el, context),
            Element::PlainInput(el) => self.call(handlers.plain_input, "plain_input", el, context),
            Element::Malformed(_) | Element::Unsupported => None,
        }
    }

    /// Renders a text object through the active `text` slot.
    pub fn text(&self, text: &TextObject, context: BlockContext) -> Option<Widget> {
        self.call(self.parser.handlers().text, "text", text, context)
    }

    /// Boxed text for optional labels, hints and placeholders.
    pub fn optional_text(
        &self,
        text: Option<&TextObject>,
        context: BlockContext,
    ) -> Option<Box<Widget>> {
        text.and_then(|text| self.text(text, context)).map(Box::new)
    }

    /// Resolves `{loading, initial}` for an element and binds its dispatcher.
    ///
    /// Lookups are memoised for the pass, so repeated calls for the same
    /// element observe the same snapshot. The store's value wins over the
    /// element's own `initialValue`.
    pub fn resolve(
        &self,
        identity: &ElementIdentity,
        context: BlockContext,
    ) -> (InteractionState, ActionDispatcher) {
        let Some(action_id) = identity.action_id.as_deref().filter(|id| !id.is_empty()) else {
            self.warn("missing_action_id", "interactive element has no actionId");
            let state = InteractionState {
                initial: identity.initial_value.clone(),
                ..InteractionState::default()
            };
            return (state, ActionDispatcher::noop());
        };

        let key = StateKey::new(context, identity.block_id.as_deref(), action_id);
        let stored = self
            .snapshot
            .borrow_mut()
            .entry(key)
            .or_insert_with_key(|key| self.env.lookup(key).unwrap_or_default())
            .clone();
        let state = InteractionState {
            initial: stored.initial.or_else(|| identity.initial_value.clone()),
            ..stored
        };

        let binding = if context.is_action_region() {
            ActionBinding {
                kind: ActionKind::Action,
                action_id: action_id.to_owned(),
                block_id: identity.block_id.clone(),
                app_id: identity.app_id.clone().or_else(|| self.app_id.map(str::to_owned)),
                view_id: self.view_id.map(str::to_owned),
            }
        } else {
            ActionBinding {
                kind: ActionKind::State,
                action_id: action_id.to_owned(),
                block_id: identity.block_id.clone(),
                app_id: identity.app_id.clone(),
                view_id: None,
            }
        };
        (state, ActionDispatcher::new(binding, self.env.action_sink()))
    }

    /// Records a degraded-rendering diagnostic for the current block.
    pub fn warn(&self, code: &str, message: impl Into<String>) {
        let path = self.block_index.get().map(|index| format!("blocks[{index}]"));
        self.warnings.borrow_mut().push(RenderWarning {
            code: code.to_owned(),
            message: Some(message.into()),
            path,
        });
    }

    pub(crate) fn enter_block(&self, index: usize) {
        self.block_index.set(Some(index));
    }

    pub(crate) fn leave_block(&self) {
        self.block_index.set(None);
    }

    pub(crate) fn into_warnings(self) -> Vec<RenderWarning> {
        self.warnings.into_inner()
    }

    fn call<T>(
        &self,
        slot: Option<Slot<T>>,
        name: &'static str,
        payload: &T,
        context: BlockContext,
    ) -> Option<Widget> {
        match slot {
            Some(slot) => slot.call(self, payload, context),
            None => {
                debug!(mode = %self.mode(), slot = name, "no handler for slot");
                self.warn(
                    "unhandled_type",
                    format!("{} renderer has no `{name}` handler", self.mode()),
                );
                None
            }
        }
    }
}
