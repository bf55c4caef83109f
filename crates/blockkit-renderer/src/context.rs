use serde::{Deserialize, Serialize};

use crate::model::ElementKind;

/// Structural region a block or element is rendered in.
///
/// Drives two things: which interaction state an element resolves to (the
/// same action id in two regions is two independent entries) and the text
/// style (mrkdwn inside a context row uses the auxiliary color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContext {
    /// Top level of a surface.
    Block,
    /// Accessory slot of a section block.
    Section,
    /// Row of an actions block.
    Actions,
    /// Element wrapped by a modal input block.
    Form,
    /// Row of a context block.
    Context,
}

impl BlockContext {
    /// Whether an element of `kind` may appear in this region.
    pub fn accepts(self, kind: ElementKind) -> bool {
        use ElementKind::*;
        match self {
            BlockContext::Block => true,
            BlockContext::Section => matches!(
                kind,
                Button | Image | Overflow | DatePicker | StaticSelect | MultiStaticSelect | SelectInput
            ),
            BlockContext::Actions => matches!(
                kind,
                Button | Overflow | DatePicker | StaticSelect | MultiStaticSelect | SelectInput
            ),
            BlockContext::Form => matches!(
                kind,
                PlainInput | DatePicker | StaticSelect | MultiStaticSelect | SelectInput
            ),
            BlockContext::Context => matches!(kind, PlainText | Mrkdwn | Image),
        }
    }

    /// Section accessories and action rows trigger block actions; every other
    /// region only updates view state.
    pub fn is_action_region(self) -> bool {
        matches!(self, BlockContext::Section | BlockContext::Actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_rows_only_take_text_and_images() {
        assert!(BlockContext::Context.accepts(ElementKind::Mrkdwn));
        assert!(BlockContext::Context.accepts(ElementKind::Image));
        assert!(!BlockContext::Context.accepts(ElementKind::Button));
    }

    #[test]
    fn plain_input_is_form_only() {
        assert!(BlockContext::Form.accepts(ElementKind::PlainInput));
        assert!(!BlockContext::Actions.accepts(ElementKind::PlainInput));
        assert!(!BlockContext::Section.accepts(ElementKind::PlainInput));
    }

    #[test]
    fn action_regions() {
        assert!(BlockContext::Section.is_action_region());
        assert!(BlockContext::Actions.is_action_region());
        assert!(!BlockContext::Form.is_action_region());
        assert!(!BlockContext::Context.is_action_region());
    }
}
