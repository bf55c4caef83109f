//! Dispatch tables and the renderer variants built from them.
//!
//! A [`HandlerTable`] has one slot per block/element type tag. A [`Parser`]
//! freezes a table at construction; the modal variant is composed from its
//! own handlers plus a one-time copy of every slot it leaves empty from the
//! message variant.

use std::fmt;

use crate::{
    context::BlockContext,
    mode::RendererMode,
    model::{
        ActionsBlock, ButtonElement, ContextBlock, DatePickerElement, DividerBlock, ImageElement,
        InputBlock, OverflowElement, PlainInputElement, SectionBlock, SelectElement, TextObject,
    },
    pass::RenderPass,
    widget::Widget,
};

/// Renders one payload in one region. `None` renders nothing.
pub type Handler<T> = fn(&RenderPass<'_>, &T, BlockContext) -> Option<Widget>;

/// A handler plus the renderer variant that defined it.
pub struct Slot<T> {
    owner: RendererMode,
    call: Handler<T>,
}

impl<T> Slot<T> {
    pub fn new(owner: RendererMode, call: Handler<T>) -> Self {
        Self { owner, call }
    }

    pub fn owner(&self) -> RendererMode {
        self.owner
    }

    pub fn call(&self, pass: &RenderPass<'_>, payload: &T, context: BlockContext) -> Option<Widget> {
        (self.call)(pass, payload, context)
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.owner)
    }
}

macro_rules! handler_slots {
    ($($slot:ident: $payload:ty),* $(,)?) => {
        /// One optional handler per block/element type tag.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct HandlerTable {
            $(pub $slot: Option<Slot<$payload>>,)*
        }

        impl HandlerTable {
            /// Slot names in declaration order.
            pub const SLOTS: &'static [&'static str] = &[$(stringify!($slot)),*];

            /// Copies `base`'s handler into every slot still empty here.
            /// Slots this table already defines are kept.
            pub fn inherit(mut self, base: &HandlerTable) -> Self {
                $(
                    if self.$slot.is_none() {
                        self.$slot = base.$slot;
                    }
                )*
                self
            }

            /// Variant that defined `slot`, or `None` when the slot is empty
            /// or unknown.
            pub fn owner(&self, slot: &str) -> Option<RendererMode> {
                match slot {
                    $(stringify!($slot) => self.$slot.map(|entry| entry.owner()),)*
                    _ => None,
                }
            }

            /// Names of the slots holding a handler.
            pub fn defined(&self) -> Vec<&'static str> {
                let mut names = Vec::new();
                $(
                    if self.$slot.is_some() {
                        names.push(stringify!($slot));
                    }
                )*
                names
            }
        }
    };
}

handler_slots! {
    button: ButtonElement,
    divider: DividerBlock,
    text: TextObject,
    section: SectionBlock,
    actions: ActionsBlock,
    context: ContextBlock,
    image: ImageElement,
    overflow: OverflowElement,
    date_picker: DatePickerElement,
    static_select: SelectElement,
    multi_static_select: SelectElement,
    select_input: SelectElement,
    input: InputBlock,
    plain_input: PlainInputElement,
}

/// A frozen renderer variant.
#[derive(Debug, Clone)]
pub struct Parser {
    mode: RendererMode,
    handlers: HandlerTable,
}

impl Parser {
    /// The base variant used for message surfaces.
    pub fn message() -> Self {
        Self::custom(RendererMode::Message, crate::message::handlers())
    }

    /// The modal variant: its own handlers, then `base` for the rest.
    /// `base` is copied now; building another base later does not affect
    /// the result.
    pub fn modal(base: &Parser) -> Self {
        Self::custom(
            RendererMode::Modal,
            crate::modal::handlers().inherit(&base.handlers),
        )
    }

    pub fn custom(mode: RendererMode, handlers: HandlerTable) -> Self {
        Self { mode, handlers }
    }

    pub fn mode(&self) -> RendererMode {
        self.mode
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn owner(&self, slot: &str) -> Option<RendererMode> {
        self.handlers.owner(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_parser_has_no_form_slots() {
        let parser = Parser::message();
        assert_eq!(parser.owner("input"), None);
        assert_eq!(parser.owner("plain_input"), None);
        assert_eq!(parser.owner("section"), Some(RendererMode::Message));
        assert_eq!(parser.handlers().defined().len(), HandlerTable::SLOTS.len() - 2);
    }

    #[test]
    fn modal_keeps_own_slots_and_inherits_the_rest() {
        let modal = Parser::modal(&Parser::message());
        assert_eq!(modal.owner("image"), Some(RendererMode::Modal));
        assert_eq!(modal.owner("input"), Some(RendererMode::Modal));
        assert_eq!(modal.owner("plain_input"), Some(RendererMode::Modal));
        for slot in ["button", "divider", "text", "section", "actions", "context", "overflow"] {
            assert_eq!(modal.owner(slot), Some(RendererMode::Message), "{slot}");
        }
        assert_eq!(modal.handlers().defined().len(), HandlerTable::SLOTS.len());
    }

    #[test]
    fn composition_is_a_snapshot() {
        let base = Parser::message();
        let modal = Parser::modal(&base);

        let mut trimmed = *base.handlers();
        trimmed.divider = None;
        let later_base = Parser::custom(RendererMode::Message, trimmed);

        assert_eq!(later_base.owner("divider"), None);
        assert_eq!(modal.owner("divider"), Some(RendererMode::Message));
    }

    fn flat_divider(
        pass: &RenderPass<'_>,
        _block: &DividerBlock,
        _context: BlockContext,
    ) -> Option<Widget> {
        Some(Widget::Divider {
            theme: pass.theme(),
        })
    }

    #[test]
    fn inherit_only_fills_empty_slots() {
        let own = HandlerTable {
            divider: Some(Slot::new(RendererMode::Modal, flat_divider)),
            ..HandlerTable::default()
        };
        let merged = own.inherit(Parser::message().handlers());
        assert_eq!(merged.owner("divider"), Some(RendererMode::Modal));
        assert_eq!(merged.owner("button"), Some(RendererMode::Message));
        assert_eq!(merged.owner("nonexistent"), None);
    }
}
