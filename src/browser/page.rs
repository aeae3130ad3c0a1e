use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Describes how to find a control on a page.
///
/// Serialized untagged: a bare string is a CSS selector, `{"xpath": "..."}` is an XPath query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Locator {
    Css(String),
    XPath { xpath: String },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(query: impl Into<String>) -> Self {
        Locator::XPath { xpath: query.into() }
    }

    /// XPath matching a button or link whose visible text contains `text` (case-insensitive)
    pub fn button_text(text: &str) -> Self {
        let needle = text.to_lowercase();
        Locator::xpath(format!(
            "//*[self::button or self::a or @role='button'][contains(translate(normalize-space(.), \
             'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), {})]",
            xpath_literal(&needle)
        ))
    }
}

/// Quote `text` as an XPath 1.0 string literal. XPath has no escapes, so text holding
/// both quote kinds is spliced together with `concat()`.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{}'", text);
    }
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    let parts: Vec<String> = text.split('\'').map(|part| format!("'{}'", part)).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css:{}", selector),
            Locator::XPath { xpath } => write!(f, "xpath:{}", xpath),
        }
    }
}

/// Attributes of a form control as reported by the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAttributes {
    /// Lowercase tag name: input, textarea, select
    pub tag: String,
    /// The `type` attribute, empty when absent
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    /// Text of the associated `<label>`, `aria-label`, or nearest preceding label-like text
    pub label: String,
}

/// A form control discovered on the current page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormField {
    /// CSS selector uniquely addressing this control
    pub selector: String,
    #[serde(flatten)]
    pub attributes: FieldAttributes,
    /// Current value of the control
    pub value: String,
}

impl FormField {
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// A single page (tab) inside a browser session.
///
/// Calls are blocking, mirroring headless_chrome. Control lookup is instant; callers poll
/// with [`FormPage::pause`] to bound their waits.
pub trait FormPage: Send {
    /// Navigate and wait for the page to settle
    fn goto(&self, url: &str) -> Result<()>;

    /// Whether the locator currently resolves to an element
    fn exists(&self, locator: &Locator) -> bool;

    fn click(&self, locator: &Locator) -> Result<()>;

    /// All visible, enabled form controls in document order
    fn form_fields(&self) -> Result<Vec<FormField>>;

    /// Type `value` into the control at `selector`
    fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Attach a local file to a file input
    fn upload(&self, selector: &str, path: &Path) -> Result<()>;

    fn pause(&self, duration: Duration);

    fn close(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_deserialization() {
        let locators: Vec<Locator> =
            serde_json::from_value(serde_json::json!(["button.jobs-apply-button", {"xpath": "//button"}])).unwrap();

        assert_eq!(locators[0], Locator::css("button.jobs-apply-button"));
        assert_eq!(locators[1], Locator::xpath("//button"));
    }

    #[test]
    fn test_button_text_lowercases_needle() {
        match Locator::button_text("Easy Apply") {
            Locator::XPath { xpath } => assert!(xpath.contains("'easy apply'")),
            other => panic!("Expected XPath locator, got {}", other),
        }
    }

    #[test]
    fn test_button_text_quotes_apostrophes() {
        match Locator::button_text("Don't Apply") {
            Locator::XPath { xpath } => assert!(xpath.ends_with(", \"don't apply\")]"), "{}", xpath),
            other => panic!("Expected XPath locator, got {}", other),
        }
    }

    #[test]
    fn test_xpath_literal() {
        assert_eq!(xpath_literal("apply"), "'apply'");
        assert_eq!(xpath_literal("o'neil"), "\"o'neil\"");
        assert_eq!(xpath_literal("say \"hi\""), "'say \"hi\"'");
        assert_eq!(xpath_literal("it's \"x\""), "concat('it', \"'\", 's \"x\"')");
        assert_eq!(xpath_literal(""), "''");
    }

    #[test]
    fn test_form_field_flattened_json() {
        let field: FormField = serde_json::from_value(serde_json::json!({
            "selector": "[data-auto-apply-id=\"3\"]",
            "tag": "input",
            "type": "email",
            "label": "Email address",
            "value": "  "
        }))
        .unwrap();

        assert_eq!(field.attributes.input_type, "email");
        assert_eq!(field.attributes.label, "Email address");
        assert!(field.is_empty());
    }
}
