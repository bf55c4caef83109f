//! Block kit document model.
//!
//! Pure data decoded from the backend's JSON. Blocks and elements are decoded
//! one at a time so a single bad node degrades to `Unsupported` or
//! `Malformed` instead of failing the whole document. Unknown fields are
//! ignored; `null` or mistyped optional fields fall back to their defaults.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::warn;

use crate::errors::RendererError;

// ---------------------------------------------------------------------------
// Text objects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    #[default]
    #[serde(alias = "plain", alias = "plainText")]
    PlainText,
    Mrkdwn,
    #[serde(other)]
    Other,
}

/// `{ text, type }` text payload. A bare JSON string decodes as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "TextRepr")]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            emoji: None,
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
        }
    }

    pub fn is_mrkdwn(&self) -> bool {
        self.kind == TextKind::Mrkdwn
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Bare(String),
    Object {
        #[serde(rename = "type", default, deserialize_with = "or_default")]
        kind: TextKind,
        #[serde(default, deserialize_with = "or_default")]
        text: String,
        #[serde(default, deserialize_with = "or_default")]
        emoji: Option<bool>,
    },
}

impl From<TextRepr> for TextObject {
    fn from(repr: TextRepr) -> Self {
        match repr {
            TextRepr::Bare(text) => TextObject::plain(text),
            TextRepr::Object { kind, text, emoji } => TextObject { kind, text, emoji },
        }
    }
}

/// Text element body once the `type` tag has been consumed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TextBody {
    #[serde(deserialize_with = "or_default")]
    pub text: String,
    #[serde(deserialize_with = "or_default")]
    pub emoji: Option<bool>,
}

impl TextBody {
    fn to_object(&self, kind: TextKind) -> TextObject {
        TextObject {
            kind,
            text: self.text.clone(),
            emoji: self.emoji,
        }
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Routing identity shared by every interactive element.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIdentity {
    #[serde(alias = "action_id", deserialize_with = "or_default")]
    pub action_id: Option<String>,
    #[serde(alias = "block_id", deserialize_with = "or_default")]
    pub block_id: Option<String>,
    #[serde(alias = "app_id", deserialize_with = "or_default")]
    pub app_id: Option<String>,
    #[serde(alias = "initial", alias = "initial_value")]
    pub initial_value: Option<Value>,
}

impl ElementIdentity {
    /// Fills ids the element does not carry itself from its enclosing block.
    pub fn inherit(&mut self, block_id: Option<&str>, app_id: Option<&str>) {
        if self.block_id.is_none() {
            self.block_id = block_id.map(str::to_owned);
        }
        if self.app_id.is_none() {
            self.app_id = app_id.map(str::to_owned);
        }
    }

    /// Replaces ids with the wrapping block's where that block has them.
    pub fn adopt(&mut self, block_id: Option<&str>, app_id: Option<&str>) {
        if let Some(block_id) = block_id {
            self.block_id = Some(block_id.to_owned());
        }
        if let Some(app_id) = app_id {
            self.app_id = Some(app_id.to_owned());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Danger,
    #[default]
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonElement {
    #[serde(flatten)]
    pub identity: ElementIdentity,
    #[serde(deserialize_with = "or_default")]
    pub text: Option<TextObject>,
    pub value: Option<Value>,
    #[serde(deserialize_with = "or_default")]
    pub style: Option<ButtonStyle>,
    #[serde(deserialize_with = "or_default")]
    pub url: Option<String>,
}

/// An image URL of the wrong type makes the whole image malformed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(alias = "image_url", deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(alias = "alt_text", deserialize_with = "or_default")]
    pub alt_text: String,
    #[serde(deserialize_with = "or_default")]
    pub title: Option<TextObject>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    #[serde(deserialize_with = "or_default")]
    pub text: TextObject,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverflowElement {
    #[serde(flatten)]
    pub identity: ElementIdentity,
    #[serde(deserialize_with = "lenient_items")]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatePickerElement {
    #[serde(flatten)]
    pub identity: ElementIdentity,
    #[serde(deserialize_with = "or_default")]
    pub placeholder: Option<TextObject>,
    #[serde(alias = "initial_date", deserialize_with = "or_default")]
    pub initial_date: Option<String>,
}

/// Shared by static, multi-static and select-input elements.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectElement {
    #[serde(flatten)]
    pub identity: ElementIdentity,
    #[serde(deserialize_with = "or_default")]
    pub placeholder: Option<TextObject>,
    #[serde(deserialize_with = "lenient_items")]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlainInputElement {
    #[serde(flatten)]
    pub identity: ElementIdentity,
    #[serde(deserialize_with = "or_default")]
    pub placeholder: Option<TextObject>,
    #[serde(deserialize_with = "or_default")]
    pub label: Option<TextObject>,
    #[serde(deserialize_with = "or_default")]
    pub hint: Option<TextObject>,
    #[serde(deserialize_with = "or_default")]
    pub description: Option<TextObject>,
    #[serde(deserialize_with = "or_default")]
    pub multiline: bool,
    #[serde(alias = "max_length", deserialize_with = "or_default")]
    pub max_length: Option<u32>,
}

/// Interactive or display leaf nested inside a block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "button")]
    Button(ButtonElement),
    #[serde(rename = "image")]
    Image(ImageElement),
    #[serde(rename = "plain_text", alias = "plain", alias = "plainText")]
    PlainText(TextBody),
    #[serde(rename = "mrkdwn")]
    Mrkdwn(TextBody),
    #[serde(rename = "overflow")]
    Overflow(OverflowElement),
    #[serde(rename = "datepicker", alias = "datePicker", alias = "date_picker")]
    DatePicker(DatePickerElement),
    #[serde(rename = "static_select", alias = "staticSelect")]
    StaticSelect(SelectElement),
    #[serde(rename = "multi_static_select", alias = "multiStaticSelect")]
    MultiStaticSelect(SelectElement),
    #[serde(rename = "select_input", alias = "selectInput")]
    SelectInput(SelectElement),
    #[serde(rename = "plain_text_input", alias = "plainInput", alias = "plain_input")]
    PlainInput(PlainInputElement),
    /// Known `type` tag whose body failed to decode.
    #[serde(skip)]
    Malformed(String),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Button,
    Image,
    PlainText,
    Mrkdwn,
    Overflow,
    DatePicker,
    StaticSelect,
    MultiStaticSelect,
    SelectInput,
    PlainInput,
    Unsupported,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::PlainText => "plain_text",
            ElementKind::Mrkdwn => "mrkdwn",
            ElementKind::Overflow => "overflow",
            ElementKind::DatePicker => "datepicker",
            ElementKind::StaticSelect => "static_select",
            ElementKind::MultiStaticSelect => "multi_static_select",
            ElementKind::SelectInput => "select_input",
            ElementKind::PlainInput => "plain_text_input",
            ElementKind::Unsupported => "unsupported",
        }
    }
}

impl Element {
    /// Decodes one element. A known `type` that fails to decode becomes
    /// [`Element::Malformed`]; anything else becomes [`Element::Unsupported`].
    pub fn from_value(value: Value) -> Self {
        let known = |element: &Element| !matches!(element, Element::Unsupported);
        match decode_node(value, "element", known) {
            Ok(element) => element,
            Err(Some(kind)) => Element::Malformed(kind),
            Err(None) => Element::Unsupported,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Button(_) => ElementKind::Button,
            Element::Image(_) => ElementKind::Image,
            Element::PlainText(_) => ElementKind::PlainText,
            Element::Mrkdwn(_) => ElementKind::Mrkdwn,
            Element::Overflow(_) => ElementKind::Overflow,
            Element::DatePicker(_) => ElementKind::DatePicker,
            Element::StaticSelect(_) => ElementKind::StaticSelect,
            Element::MultiStaticSelect(_) => ElementKind::MultiStaticSelect,
            Element::SelectInput(_) => ElementKind::SelectInput,
            Element::PlainInput(_) => ElementKind::PlainInput,
            Element::Malformed(_) | Element::Unsupported => ElementKind::Unsupported,
        }
    }

    /// Text object view of `plain_text` / `mrkdwn` elements.
    pub fn as_text(&self) -> Option<TextObject> {
        match self {
            Element::PlainText(body) => Some(body.to_object(TextKind::PlainText)),
            Element::Mrkdwn(body) => Some(body.to_object(TextKind::Mrkdwn)),
            _ => None,
        }
    }

    /// Mutable routing identity, for elements that carry one.
    pub fn identity_mut(&mut self) -> Option<&mut ElementIdentity> {
        match self {
            Element::Button(el) => Some(&mut el.identity),
            Element::Overflow(el) => Some(&mut el.identity),
            Element::DatePicker(el) => Some(&mut el.identity),
            Element::StaticSelect(el) | Element::MultiStaticSelect(el) | Element::SelectInput(el) => {
                Some(&mut el.identity)
            }
            Element::PlainInput(el) => Some(&mut el.identity),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerBlock {
    #[serde(alias = "block_id", deserialize_with = "or_default")]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionBlock {
    #[serde(alias = "block_id", deserialize_with = "or_default")]
    pub block_id: Option<String>,
    #[serde(alias = "app_id", deserialize_with = "or_default")]
    pub app_id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub text: Option<TextObject>,
    #[serde(deserialize_with = "lenient_items")]
    pub fields: Vec<TextObject>,
    #[serde(deserialize_with = "lenient_element")]
    pub accessory: Option<Element>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionsBlock {
    #[serde(alias = "block_id", deserialize_with = "or_default")]
    pub block_id: Option<String>,
    #[serde(alias = "app_id", deserialize_with = "or_default")]
    pub app_id: Option<String>,
    #[serde(deserialize_with = "lenient_elements")]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextBlock {
    #[serde(alias = "block_id", deserialize_with = "or_default")]
    pub block_id: Option<String>,
    #[serde(deserialize_with = "lenient_elements")]
    pub elements: Vec<Element>,
}

/// Modal-only wrapper around a single form element.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputBlock {
    #[serde(alias = "block_id", deserialize_with = "or_default")]
    pub block_id: Option<String>,
    #[serde(alias = "app_id", deserialize_with = "or_default")]
    pub app_id: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub label: Option<TextObject>,
    #[serde(deserialize_with = "or_default")]
    pub description: Option<TextObject>,
    #[serde(deserialize_with = "or_default")]
    pub hint: Option<TextObject>,
    #[serde(deserialize_with = "lenient_element")]
    pub element: Option<Element>,
    #[serde(deserialize_with = "or_default")]
    pub optional: bool,
}

/// Top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Divider(DividerBlock),
    Section(SectionBlock),
    Actions(ActionsBlock),
    Context(ContextBlock),
    Image(ImageElement),
    Input(InputBlock),
    /// Known `type` tag whose body failed to decode.
    #[serde(skip)]
    Malformed(String),
    #[serde(other)]
    Unsupported,
}

impl Block {
    /// Decodes one block, degrading like [`Element::from_value`].
    pub fn from_value(value: Value) -> Self {
        let known = |block: &Block| !matches!(block, Block::Unsupported);
        match decode_node(value, "block", known) {
            Ok(block) => block,
            Err(Some(kind)) => Block::Malformed(kind),
            Err(None) => Block::Unsupported,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Block::Divider(_) => "divider",
            Block::Section(_) => "section",
            Block::Actions(_) => "actions",
            Block::Context(_) => "context",
            Block::Image(_) => "image",
            Block::Input(_) => "input",
            Block::Malformed(_) => "malformed",
            Block::Unsupported => "unsupported",
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A block kit document: the blocks plus optional surface identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub app_id: Option<String>,
    pub view_id: Option<String>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            app_id: None,
            view_id: None,
        }
    }

    /// Accepts a bare block array or an object carrying `blocks`
    /// (plus optional `appId` / `viewId`).
    pub fn from_value(value: &Value) -> Result<Self, RendererError> {
        match value {
            Value::Array(items) => Ok(Self::new(decode_blocks(items))),
            Value::Object(map) => {
                let blocks = map
                    .get("blocks")
                    .and_then(Value::as_array)
                    .ok_or(RendererError::InvalidDocument)?;
                Ok(Self {
                    blocks: decode_blocks(blocks),
                    app_id: string_field(value, &["appId", "app_id"]),
                    view_id: string_field(value, &["viewId", "view_id"]),
                })
            }
            _ => Err(RendererError::InvalidDocument),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RendererError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }
}

fn decode_blocks(items: &[Value]) -> Vec<Block> {
    items.iter().cloned().map(Block::from_value).collect()
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Decodes one tagged node. On failure the error carries the node's `type`
/// when that tag alone decodes to a node `known` accepts.
fn decode_node<T: DeserializeOwned>(
    value: Value,
    what: &'static str,
    known: impl Fn(&T) -> bool,
) -> Result<T, Option<String>> {
    let kind = value.get("type").and_then(Value::as_str).map(str::to_owned);
    serde_json::from_value(value).map_err(|err| {
        warn!(
            node = what,
            kind = kind.as_deref().unwrap_or_default(),
            error = %err,
            "dropping malformed node"
        );
        kind.filter(|kind| {
            serde_json::from_value::<T>(json!({ "type": kind }))
                .is_ok_and(|bare| known(&bare))
        })
    })
}

/// `null` decodes as the default; other type errors still fail the node.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` or a mistyped value decodes as the default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(raw).unwrap_or_else(|err| {
        warn!(error = %err, "ignoring mistyped field");
        T::default()
    }))
}

/// Keeps the items of a list that decode, dropping the rest.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!(found = %other, "expected a list");
            Vec::new()
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .map_err(|err| warn!(error = %err, "dropping malformed list item"))
                .ok()
        })
        .collect())
}

fn lenient_elements<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(items.into_iter().map(Element::from_value).collect())
}

fn lenient_element<'de, D>(deserializer: D) -> Result<Option<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(Element::from_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_object_accepts_bare_string_and_aliases() {
        let bare: TextObject = serde_json::from_value(json!("Go")).expect("bare");
        assert_eq!(bare, TextObject::plain("Go"));

        let aliased: TextObject =
            serde_json::from_value(json!({ "text": "Name", "type": "plain" })).expect("alias");
        assert_eq!(aliased.kind, TextKind::PlainText);

        let md: TextObject =
            serde_json::from_value(json!({ "text": "*hi*", "type": "mrkdwn" })).expect("md");
        assert!(md.is_mrkdwn());

        let odd: TextObject =
            serde_json::from_value(json!({ "text": "x", "type": "html" })).expect("other");
        assert_eq!(odd.kind, TextKind::Other);
    }

    #[test]
    fn plain_input_alias_and_initial_value() {
        let element = Element::from_value(json!({
            "type": "plainInput",
            "actionId": "name",
            "initial": "Bob",
            "multiline": true
        }));
        let Element::PlainInput(input) = element else {
            panic!("expected plain input, got {element:?}");
        };
        assert_eq!(input.identity.action_id.as_deref(), Some("name"));
        assert_eq!(input.identity.initial_value, Some(json!("Bob")));
        assert!(input.multiline);
    }

    #[test]
    fn unknown_types_and_extra_fields_are_tolerated() {
        let block = Block::from_value(json!({ "type": "carousel", "cards": [] }));
        assert_eq!(block, Block::Unsupported);

        let block = Block::from_value(json!({ "type": "divider", "blockId": "d1", "shiny": true }));
        assert_eq!(
            block,
            Block::Divider(DividerBlock {
                block_id: Some("d1".into())
            })
        );
    }

    #[test]
    fn malformed_element_only_drops_itself() {
        let block = Block::from_value(json!({
            "type": "actions",
            "blockId": "row",
            "elements": [
                { "type": "button", "actionId": "ok", "text": { "type": "plain_text", "text": "Ok" } },
                { "type": "image", "imageUrl": 42 },
                { "no_type": true }
            ]
        }));
        let Block::Actions(actions) = block else {
            panic!("expected actions block");
        };
        assert_eq!(actions.elements.len(), 3);
        assert_eq!(actions.elements[0].kind(), ElementKind::Button);
        assert_eq!(actions.elements[1], Element::Malformed("image".into()));
        assert_eq!(actions.elements[2], Element::Unsupported);
    }

    #[test]
    fn malformed_block_degrades_without_failing_document() {
        let doc = Document::from_value(&json!([
            { "type": "image", "imageUrl": ["x"] },
            { "type": "divider" }
        ]))
        .expect("document");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0], Block::Malformed("image".into()));
        assert_eq!(doc.blocks[1].kind(), "divider");
    }

    #[test]
    fn null_and_mistyped_optional_fields_fall_back() {
        let element = Element::from_value(json!({
            "type": "plain_text_input",
            "actionId": "name",
            "multiline": null,
            "maxLength": "long",
            "label": { "text": null }
        }));
        let Element::PlainInput(input) = element else {
            panic!("expected plain input, got {element:?}");
        };
        assert!(!input.multiline);
        assert_eq!(input.max_length, None);
        assert_eq!(input.label, Some(TextObject::plain("")));

        let element = Element::from_value(json!({ "type": "button", "actionId": 42, "style": 7 }));
        let Element::Button(button) = element else {
            panic!("expected button, got {element:?}");
        };
        assert_eq!(button.identity.action_id, None);
        assert_eq!(button.style, None);

        let block = Block::from_value(json!({
            "type": "section",
            "text": "hello",
            "fields": null,
            "blockId": null
        }));
        let Block::Section(section) = block else {
            panic!("expected section, got {block:?}");
        };
        assert_eq!(section.text, Some(TextObject::plain("hello")));
        assert!(section.fields.is_empty());

        let element = Element::from_value(json!({
            "type": "static_select",
            "actionId": "size",
            "options": [{ "text": "S", "value": "s" }, { "text": "?", "value": 5 }]
        }));
        let Element::StaticSelect(select) = element else {
            panic!("expected select, got {element:?}");
        };
        assert_eq!(select.options.len(), 1);
        assert_eq!(select.options[0].value, "s");
    }

    #[test]
    fn document_object_form_carries_ids() {
        let doc = Document::from_value(&json!({
            "appId": "app-1",
            "view_id": "view-9",
            "blocks": [{ "type": "divider" }]
        }))
        .expect("document");
        assert_eq!(doc.app_id.as_deref(), Some("app-1"));
        assert_eq!(doc.view_id.as_deref(), Some("view-9"));
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn document_rejects_scalars() {
        assert!(matches!(
            Document::from_value(&json!("blocks")),
            Err(RendererError::InvalidDocument)
        ));
        assert!(matches!(
            Document::from_value(&json!({ "title": "x" })),
            Err(RendererError::InvalidDocument)
        ));
    }

    #[test]
    fn identity_inherit_keeps_own_ids() {
        let mut identity = ElementIdentity {
            action_id: Some("a".into()),
            block_id: Some("own".into()),
            ..ElementIdentity::default()
        };
        identity.inherit(Some("outer"), Some("app"));
        assert_eq!(identity.block_id.as_deref(), Some("own"));
        assert_eq!(identity.app_id.as_deref(), Some("app"));

        identity.adopt(Some("input"), None);
        assert_eq!(identity.block_id.as_deref(), Some("input"));
        assert_eq!(identity.app_id.as_deref(), Some("app"));
    }
}
