//! Widget descriptors emitted by the renderers.
//!
//! The engine does not draw anything. Each descriptor names the primitive
//! the host should instantiate and carries the data it receives: theme,
//! resolved `loading`/`initial` snapshot and the bound action dispatcher.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{
    context::BlockContext,
    model::ButtonStyle,
    state::{ActionDispatcher, ActionPayload},
    theme::Theme,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// Raw characters, no styling.
    Text { text: String },
    /// Styled (mrkdwn) text. `color` is set when the region overrides it.
    StyledText {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Button(ButtonWidget),
    Divider { theme: Theme },
    Section(SectionWidget),
    Actions(ActionsWidget),
    Context(ContextWidget),
    Image(ImageWidget),
    Overflow(OverflowWidget),
    DatePicker(DatePickerWidget),
    Select(SelectWidget),
    MultiSelect(MultiSelectWidget),
    Input(InputWidget),
    TextInput(TextInputWidget),
}

impl Widget {
    /// Plain characters of a text widget.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Widget::Text { text } | Widget::StyledText { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Text { .. } => "text",
            Widget::StyledText { .. } => "styled",
            Widget::Button(_) => "button",
            Widget::Divider { .. } => "divider",
            Widget::Section(_) => "section",
            Widget::Actions(_) => "actions",
            Widget::Context(_) => "context",
            Widget::Image(_) => "image",
            Widget::Overflow(_) => "overflow",
            Widget::DatePicker(_) => "datepicker",
            Widget::Select(_) => "select",
            Widget::MultiSelect(_) => "multi_select",
            Widget::Input(_) => "input",
            Widget::TextInput(_) => "text_input",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<Widget>>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub loading: bool,
    pub theme: Theme,
    pub on_press: ActionDispatcher,
}

impl ButtonWidget {
    /// Dispatches `{ value }`. Refused while a previous press is pending.
    pub fn press(&self) -> bool {
        if self.loading {
            return false;
        }
        let value = self.value.clone().unwrap_or(Value::Null);
        self.on_press.dispatch(ActionPayload { value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Box<Widget>>,
    pub fields: Vec<Widget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory: Option<Box<Widget>>,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionsWidget {
    pub elements: Vec<Widget>,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextWidget {
    pub elements: Vec<Widget>,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageWidget {
    pub url: String,
    pub alt_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Box<Widget>>,
    pub context: BlockContext,
    pub theme: Theme,
}

impl ImageWidget {
    /// Inline thumbnail unless the image is a top-level block.
    pub fn is_thumbnail(&self) -> bool {
        self.context != BlockContext::Block
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Widget>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverflowWidget {
    pub options: Vec<MenuOption>,
    pub context: BlockContext,
    pub loading: bool,
    pub theme: Theme,
    pub on_select: ActionDispatcher,
}

impl OverflowWidget {
    pub fn select(&self, value: &str) -> bool {
        !self.loading && self.on_select.dispatch(ActionPayload::value(value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePickerWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub context: BlockContext,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub theme: Theme,
    pub on_change: ActionDispatcher,
}

impl DatePickerWidget {
    /// `date` is an ISO `YYYY-MM-DD` string.
    pub fn pick(&self, date: &str) -> bool {
        !self.loading && self.on_change.dispatch(ActionPayload::value(date))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<Widget>>,
    pub options: Vec<MenuOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub theme: Theme,
    pub on_change: ActionDispatcher,
}

impl SelectWidget {
    pub fn change(&self, value: &str) -> bool {
        !self.loading && self.on_change.dispatch(ActionPayload::value(value))
    }
}

/// Shared by multi-static selects and select inputs; `multiselect` tells
/// the two apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiSelectWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<Widget>>,
    pub options: Vec<MenuOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub multiselect: bool,
    pub context: BlockContext,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub theme: Theme,
    pub on_change: ActionDispatcher,
}

impl MultiSelectWidget {
    /// Single mode forwards the first value only.
    pub fn change(&self, values: &[&str]) -> bool {
        if self.loading {
            return false;
        }
        let value = if self.multiselect {
            Value::from(values.to_vec())
        } else {
            values.first().map(|v| Value::from(*v)).unwrap_or(Value::Null)
        };
        self.on_change.dispatch(ActionPayload { value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<Widget>>,
    pub optional: bool,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInputWidget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<Widget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<Widget>>,
    pub multiline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub theme: Theme,
    pub on_change: ActionDispatcher,
}

impl TextInputWidget {
    /// Dispatches the current text. Editing is disabled while loading.
    pub fn change_text(&self, value: &str) -> bool {
        !self.loading && self.on_change.dispatch(ActionPayload::value(value))
    }

    /// Pre-filled text, when the initial value is a string.
    pub fn default_text(&self) -> Option<&str> {
        self.default_value.as_ref().and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

fn quoted(widget: Option<&Widget>) -> String {
    format!("{:?}", widget.and_then(Widget::as_text).unwrap_or_default())
}

fn action_of(dispatcher: &ActionDispatcher) -> &str {
    dispatcher
        .binding()
        .map(|binding| binding.action_id.as_str())
        .unwrap_or("-")
}

fn flag(f: &mut fmt::Formatter<'_>, on: bool, name: &str) -> fmt::Result {
    if on { write!(f, " {name}") } else { Ok(()) }
}

impl Widget {
    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(f, "{pad}")?;
        match self {
            Widget::Text { text } => writeln!(f, "text {text:?}"),
            Widget::StyledText { text, color } => {
                write!(f, "styled {text:?}")?;
                if let Some(color) = color {
                    write!(f, " color={color}")?;
                }
                writeln!(f)
            }
            Widget::Button(button) => {
                write!(
                    f,
                    "button {} action={}",
                    quoted(button.label.as_deref()),
                    action_of(&button.on_press)
                )?;
                flag(f, button.loading, "loading")?;
                writeln!(f)
            }
            Widget::Divider { .. } => writeln!(f, "divider"),
            Widget::Section(section) => {
                writeln!(f, "section")?;
                if let Some(text) = &section.text {
                    text.write_outline(f, depth + 1)?;
                }
                for field in &section.fields {
                    field.write_outline(f, depth + 1)?;
                }
                if let Some(accessory) = &section.accessory {
                    accessory.write_outline(f, depth + 1)?;
                }
                Ok(())
            }
            Widget::Actions(actions) => {
                writeln!(f, "actions")?;
                actions
                    .elements
                    .iter()
                    .try_for_each(|child| child.write_outline(f, depth + 1))
            }
            Widget::Context(context) => {
                writeln!(f, "context")?;
                context
                    .elements
                    .iter()
                    .try_for_each(|child| child.write_outline(f, depth + 1))
            }
            Widget::Image(image) => {
                let layout = if image.is_thumbnail() { "thumb" } else { "block" };
                writeln!(f, "image {} {layout}", image.url)
            }
            Widget::Overflow(overflow) => {
                write!(
                    f,
                    "overflow action={} options={}",
                    action_of(&overflow.on_select),
                    overflow.options.len()
                )?;
                flag(f, overflow.loading, "loading")?;
                writeln!(f)
            }
            Widget::DatePicker(picker) => {
                write!(f, "datepicker action={}", action_of(&picker.on_change))?;
                if let Some(value) = &picker.value {
                    write!(f, " value={value}")?;
                }
                flag(f, picker.loading, "loading")?;
                writeln!(f)
            }
            Widget::Select(select) => {
                write!(
                    f,
                    "select action={} options={}",
                    action_of(&select.on_change),
                    select.options.len()
                )?;
                flag(f, select.loading, "loading")?;
                writeln!(f)
            }
            Widget::MultiSelect(select) => {
                write!(
                    f,
                    "multi_select action={} options={}",
                    action_of(&select.on_change),
                    select.options.len()
                )?;
                flag(f, select.multiselect, "multi")?;
                flag(f, select.loading, "loading")?;
                writeln!(f)
            }
            Widget::Input(input) => {
                writeln!(f, "input {}", quoted(input.label.as_deref()))?;
                if let Some(element) = &input.element {
                    element.write_outline(f, depth + 1)?;
                }
                Ok(())
            }
            Widget::TextInput(input) => {
                write!(f, "text_input action={}", action_of(&input.on_change))?;
                if let Some(value) = &input.default_value {
                    write!(f, " value={value}")?;
                }
                flag(f, input.multiline, "multiline")?;
                flag(f, input.loading, "loading")?;
                writeln!(f)
            }
        }
    }
}
