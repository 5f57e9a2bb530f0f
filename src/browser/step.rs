use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One declarative browser interaction, executed in list order by a
/// [`PageDriver`](crate::browser::PageDriver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InteractionStep {
    /// Click the element with the given `id` attribute
    ClickById { id: String },

    /// Click the first element carrying the given class
    ClickByClass { class: String },

    /// Click the first element matching a CSS selector
    ClickBySelector { selector: String },

    /// Focus the element with the given `id` and type text into it
    TypeIntoById { id: String, text: String },

    /// Press Enter in the focused element
    Submit,
}

impl InteractionStep {
    pub fn click_by_id(id: impl Into<String>) -> Self {
        Self::ClickById { id: id.into() }
    }

    pub fn click_by_class(class: impl Into<String>) -> Self {
        Self::ClickByClass { class: class.into() }
    }

    pub fn click_by_selector(selector: impl Into<String>) -> Self {
        Self::ClickBySelector { selector: selector.into() }
    }

    pub fn type_into_by_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::TypeIntoById { id: id.into(), text: text.into() }
    }

    /// CSS selector of the element this step targets, `None` for keyboard-only steps
    pub fn locator(&self) -> Option<String> {
        match self {
            Self::ClickById { id } | Self::TypeIntoById { id, .. } => {
                Some(format!("[id=\"{}\"]", quote_attr(id)))
            }
            Self::ClickByClass { class } => Some(format!("[class~=\"{}\"]", quote_attr(class))),
            Self::ClickBySelector { selector } => Some(selector.clone()),
            Self::Submit => None,
        }
    }
}

/// Escape a value for use inside a double-quoted CSS attribute selector
fn quote_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for InteractionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClickById { id } => write!(f, "click #{}", id),
            Self::ClickByClass { class } => write!(f, "click .{}", class),
            Self::ClickBySelector { selector } => write!(f, "click {}", selector),
            Self::TypeIntoById { id, text } => write!(f, "type {} chars into #{}", text.chars().count(), id),
            Self::Submit => f.write_str("submit"),
        }
    }
}
