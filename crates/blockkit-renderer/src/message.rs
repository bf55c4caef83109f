//! Message surface handlers: the canonical block/element → widget mapping.

use serde_json::Value;

use crate::{
    context::BlockContext,
    mode::RendererMode,
    model::{
        ActionsBlock, ButtonElement, ContextBlock, DatePickerElement, DividerBlock, Element,
        ImageElement, OverflowElement, SectionBlock, SelectElement, SelectOption, TextObject,
    },
    parser::{HandlerTable, Slot},
    pass::RenderPass,
    widget::{
        ActionsWidget, ButtonWidget, ContextWidget, DatePickerWidget, ImageWidget, MenuOption,
        MultiSelectWidget, OverflowWidget, SectionWidget, SelectWidget, Widget,
    },
};

const OWNER: RendererMode = RendererMode::Message;

pub(crate) fn handlers() -> HandlerTable {
    HandlerTable {
        button: Some(Slot::new(OWNER, button)),
        divider: Some(Slot::new(OWNER, divider)),
        text: Some(Slot::new(OWNER, text)),
        section: Some(Slot::new(OWNER, section)),
        actions: Some(Slot::new(OWNER, actions)),
        context: Some(Slot::new(OWNER, context)),
        image: Some(Slot::new(OWNER, image)),
        overflow: Some(Slot::new(OWNER, overflow)),
        date_picker: Some(Slot::new(OWNER, date_picker)),
        static_select: Some(Slot::new(OWNER, static_select)),
        multi_static_select: Some(Slot::new(OWNER, multi_static_select)),
        select_input: Some(Slot::new(OWNER, select_input)),
        input: None,
        plain_input: None,
    }
}

fn button(pass: &RenderPass<'_>, element: &ButtonElement, context: BlockContext) -> Option<Widget> {
    let (state, action) = pass.resolve(&element.identity, context);
    let label = pass.text(element.text.as_ref().unwrap_or(&TextObject::default()), context);
    Some(Widget::Button(ButtonWidget {
        key: element.identity.action_id.clone(),
        label: label.map(Box::new),
        style: element.style.unwrap_or_default(),
        value: element.value.clone(),
        url: element.url.clone(),
        loading: state.loading,
        theme: pass.theme(),
        on_press: action,
    }))
}

fn divider(pass: &RenderPass<'_>, _block: &DividerBlock, _context: BlockContext) -> Option<Widget> {
    Some(Widget::Divider {
        theme: pass.theme(),
    })
}

/// Non-mrkdwn text stays raw. Mrkdwn becomes styled text, in the auxiliary
/// color when rendered inside a context row.
fn text(pass: &RenderPass<'_>, text: &TextObject, context: BlockContext) -> Option<Widget> {
    if !text.is_mrkdwn() {
        return Some(Widget::Text {
            text: text.text.clone(),
        });
    }
    let color = (context == BlockContext::Context).then(|| pass.palette().auxiliary_text.to_owned());
    Some(Widget::StyledText {
        text: text.text.clone(),
        color,
    })
}

fn section(pass: &RenderPass<'_>, block: &SectionBlock, _context: BlockContext) -> Option<Widget> {
    let region = BlockContext::Section;
    let accessory = block.accessory.as_ref().and_then(|element| {
        let element = scoped(element, block.block_id.as_deref(), block.app_id.as_deref());
        pass.render_element(&element, region)
    });
    Some(Widget::Section(SectionWidget {
        text: pass.optional_text(block.text.as_ref(), region),
        fields: block
            .fields
            .iter()
            .filter_map(|field| pass.text(field, region))
            .collect(),
        accessory: accessory.map(Box::new),
        theme: pass.theme(),
    }))
}

fn actions(pass: &RenderPass<'_>, block: &ActionsBlock, _context: BlockContext) -> Option<Widget> {
    let elements = block
        .elements
        .iter()
        .filter_map(|element| {
            let element = scoped(element, block.block_id.as_deref(), block.app_id.as_deref());
            pass.render_element(&element, BlockContext::Actions)
        })
        .collect();
    Some(Widget::Actions(ActionsWidget {
        elements,
        theme: pass.theme(),
    }))
}

fn context(pass: &RenderPass<'_>, block: &ContextBlock, _context: BlockContext) -> Option<Widget> {
    let elements = block
        .elements
        .iter()
        .filter_map(|element| pass.render_element(element, BlockContext::Context))
        .collect();
    Some(Widget::Context(ContextWidget {
        elements,
        theme: pass.theme(),
    }))
}

fn image(pass: &RenderPass<'_>, element: &ImageElement, context: BlockContext) -> Option<Widget> {
    Some(Widget::Image(ImageWidget {
        url: element.image_url.clone(),
        alt_text: element.alt_text.clone(),
        title: pass.optional_text(element.title.as_ref(), context),
        context,
        theme: pass.theme(),
    }))
}

fn overflow(pass: &RenderPass<'_>, element: &OverflowElement, context: BlockContext) -> Option<Widget> {
    let (state, action) = pass.resolve(&element.identity, context);
    Some(Widget::Overflow(OverflowWidget {
        options: menu_options(pass, &element.options, context),
        context,
        loading: state.loading,
        theme: pass.theme(),
        on_select: action,
    }))
}

fn date_picker(
    pass: &RenderPass<'_>,
    element: &DatePickerElement,
    context: BlockContext,
) -> Option<Widget> {
    let (state, action) = pass.resolve(&element.identity, context);
    let value = state
        .initial
        .or_else(|| element.initial_date.clone().map(Value::String));
    Some(Widget::DatePicker(DatePickerWidget {
        placeholder: pass.optional_text(element.placeholder.as_ref(), context),
        initial_date: element.initial_date.clone(),
        value,
        context,
        loading: state.loading,
        error: state.error,
        theme: pass.theme(),
        on_change: action,
    }))
}

fn static_select(
    pass: &RenderPass<'_>,
    element: &SelectElement,
    context: BlockContext,
) -> Option<Widget> {
    let (state, action) = pass.resolve(&element.identity, context);
    Some(Widget::Select(SelectWidget {
        placeholder: pass.optional_text(element.placeholder.as_ref(), context),
        options: menu_options(pass, &element.options, context),
        value: state.initial,
        loading: state.loading,
        error: state.error,
        theme: pass.theme(),
        on_change: action,
    }))
}

fn multi_static_select(
    pass: &RenderPass<'_>,
    element: &SelectElement,
    context: BlockContext,
) -> Option<Widget> {
    multi_select(pass, element, context, true)
}

fn select_input(
    pass: &RenderPass<'_>,
    element: &SelectElement,
    context: BlockContext,
) -> Option<Widget> {
    multi_select(pass, element, context, false)
}

fn multi_select(
    pass: &RenderPass<'_>,
    element: &SelectElement,
    context: BlockContext,
    multiselect: bool,
) -> Option<Widget> {
    let (state, action) = pass.resolve(&element.identity, context);
    Some(Widget::MultiSelect(MultiSelectWidget {
        placeholder: pass.optional_text(element.placeholder.as_ref(), context),
        options: menu_options(pass, &element.options, context),
        value: state.initial,
        multiselect,
        context,
        loading: state.loading,
        error: state.error,
        theme: pass.theme(),
        on_change: action,
    }))
}

fn menu_options(
    pass: &RenderPass<'_>,
    options: &[SelectOption],
    context: BlockContext,
) -> Vec<MenuOption> {
    options
        .iter()
        .map(|option| MenuOption {
            label: pass.text(&option.text, context),
            value: option.value.clone(),
        })
        .collect()
}

/// Copy of `element` carrying its enclosing block's ids where it has none.
fn scoped(element: &Element, block_id: Option<&str>, app_id: Option<&str>) -> Element {
    let mut element = element.clone();
    if let Some(identity) = element.identity_mut() {
        identity.inherit(block_id, app_id);
    }
    element
}
