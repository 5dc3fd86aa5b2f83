//! Declarative line-item description.
//!
//! A line item is one field the conversation has to collect. It is loaded
//! verbatim from the agent roster and never mutated once a goal wraps it.

use serde::{Deserialize, Serialize};

use super::value::FieldValue;

/// Primitive type of a line item's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        };
        write!(f, "{}", s)
    }
}

/// One field of the bill of materials.
///
/// # Invariants (checked lazily by [`LineItem::validate`])
///
/// - `name` and `prompt` are non-empty
/// - optional items carry a non-empty `preliminary_prompt` and `help_document`
/// - `min_val <= max_val` when both are present
/// - `list_of_valid_values`, when present, is non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub prompt: String,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_of_valid_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_val: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_val: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_integer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preliminary_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_document: Option<String>,
}

impl LineItem {
    /// Creates a required line item with no constraints.
    pub fn new(name: impl Into<String>, field_type: FieldType, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            prompt: prompt.into(),
            is_optional: false,
            default_value: None,
            list_of_valid_values: None,
            min_val: None,
            max_val: None,
            units_description: None,
            is_integer: None,
            preliminary_prompt: None,
            help_document: None,
        }
    }

    /// Marks the item optional, supplying the interest question and help text.
    pub fn optional(
        mut self,
        preliminary_prompt: impl Into<String>,
        help_document: impl Into<String>,
    ) -> Self {
        self.is_optional = true;
        self.preliminary_prompt = Some(preliminary_prompt.into());
        self.help_document = Some(help_document.into());
        self
    }

    /// Restricts a string item to a closed set of choices.
    pub fn with_valid_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_of_valid_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets numeric bounds. Either side may be absent.
    pub fn with_bounds(mut self, min_val: Option<f64>, max_val: Option<f64>) -> Self {
        self.min_val = min_val;
        self.max_val = max_val;
        self
    }

    /// Describes the unit a number is expressed in.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units_description = Some(units.into());
        self
    }

    /// Requires a number to be whole.
    pub fn integer(mut self) -> Self {
        self.is_integer = Some(true);
        self
    }

    /// Attaches a help document without making the item optional.
    pub fn with_help(mut self, help_document: impl Into<String>) -> Self {
        self.help_document = Some(help_document.into());
        self
    }

    /// Sets the value used when nothing else is supplied.
    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Returns true if a number must be whole.
    pub fn requires_integer(&self) -> bool {
        self.is_integer.unwrap_or(false)
    }

    /// Returns the help text, if any was configured.
    pub fn help_text(&self) -> Option<&str> {
        self.help_document
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
