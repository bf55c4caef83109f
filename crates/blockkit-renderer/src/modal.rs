//! Modal surface handlers.
//!
//! Only the slots defined here belong to the modal variant; everything else
//! is copied from the message variant when [`crate::Parser::modal`] runs.

use crate::{
    context::BlockContext,
    mode::RendererMode,
    model::{ImageElement, InputBlock, PlainInputElement},
    parser::{HandlerTable, Slot},
    pass::RenderPass,
    widget::{ImageWidget, InputWidget, TextInputWidget, Widget},
};

const OWNER: RendererMode = RendererMode::Modal;

/// Minimum height requested for multiline text inputs.
pub const MULTILINE_MIN_HEIGHT: u32 = 130;

pub(crate) fn handlers() -> HandlerTable {
    HandlerTable {
        input: Some(Slot::new(OWNER, input)),
        image: Some(Slot::new(OWNER, image)),
        plain_input: Some(Slot::new(OWNER, plain_input)),
        ..HandlerTable::default()
    }
}

fn input(pass: &RenderPass<'_>, block: &InputBlock, _context: BlockContext) -> Option<Widget> {
    let label_region = BlockContext::Form;
    let element = block.element.as_ref().and_then(|element| {
        let mut element = element.clone();
        if let Some(identity) = element.identity_mut() {
            identity.adopt(block.block_id.as_deref(), block.app_id.as_deref());
        }
        pass.render_element(&element, BlockContext::Form)
    });
    Some(Widget::Input(InputWidget {
        label: pass.optional_text(block.label.as_ref(), label_region),
        description: pass.optional_text(block.description.as_ref(), label_region),
        hint: pass.optional_text(block.hint.as_ref(), label_region),
        element: element.map(Box::new),
        optional: block.optional,
        theme: pass.theme(),
    }))
}

fn image(pass: &RenderPass<'_>, element: &ImageElement, context: BlockContext) -> Option<Widget> {
    let title = pass.optional_text(element.title.as_ref(), context);
    Some(Widget::Image(ImageWidget {
        url: element.image_url.clone(),
        alt_text: element.alt_text.clone(),
        title,
        context,
        theme: pass.theme(),
    }))
}

fn plain_input(
    pass: &RenderPass<'_>,
    element: &PlainInputElement,
    context: BlockContext,
) -> Option<Widget> {
    let (state, action) = pass.resolve(&element.identity, context);
    Some(Widget::TextInput(TextInputWidget {
        id: element.identity.action_id.clone(),
        label: pass.optional_text(element.label.as_ref(), context),
        hint: pass.optional_text(element.hint.as_ref(), context),
        description: pass.optional_text(element.description.as_ref(), context),
        placeholder: pass.optional_text(element.placeholder.as_ref(), context),
        multiline: element.multiline,
        min_height: element.multiline.then_some(MULTILINE_MIN_HEIGHT),
        max_length: element.max_length,
        default_value: state.initial,
        loading: state.loading,
        error: state.error,
        theme: pass.theme(),
        on_change: action,
    }))
}
