//! Line-item schema validation.
//!
//! Validation collects every violation instead of stopping at the first one,
//! so a malformed roster entry can be fixed in a single pass.

use std::fmt;

use super::schema::{FieldType, LineItem};

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field of the line item that is at fault.
    pub field: &'static str,
    /// Human readable description.
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found on one line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationList {
    pub item: String,
    pub violations: Vec<Violation>,
}

impl ViolationList {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line item '{}' has {} violation(s):",
            self.item,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ViolationList {}

impl LineItem {
    /// Lists every schema violation of this item. Empty means valid.
    pub fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();

        if self.name.trim().is_empty() {
            found.push(Violation::new("name", "cannot be empty"));
        }
        if self.prompt.trim().is_empty() {
            found.push(Violation::new("prompt", "cannot be empty"));
        }

        if self.is_optional {
            if is_blank(&self.preliminary_prompt) {
                found.push(Violation::new(
                    "preliminaryPrompt",
                    "is required for optional items",
                ));
            }
            if is_blank(&self.help_document) {
                found.push(Violation::new(
                    "helpDocument",
                    "is required for optional items",
                ));
            }
        }

        if let Some(values) = &self.list_of_valid_values {
            if self.field_type != FieldType::String {
                found.push(Violation::new(
                    "listOfValidValues",
                    format!("only applies to string items, not {}", self.field_type),
                ));
            }
            if values.is_empty() {
                found.push(Violation::new("listOfValidValues", "cannot be empty"));
            } else if values.iter().any(|v| v.trim().is_empty()) {
                found.push(Violation::new(
                    "listOfValidValues",
                    "cannot contain blank entries",
                ));
            }
        }

        if self.field_type != FieldType::Number {
            if self.min_val.is_some() || self.max_val.is_some() {
                found.push(Violation::new(
                    "minVal/maxVal",
                    format!("only apply to number items, not {}", self.field_type),
                ));
            }
            if self.units_description.is_some() {
                found.push(Violation::new(
                    "unitsDescription",
                    format!("only applies to number items, not {}", self.field_type),
                ));
            }
            if self.is_integer.is_some() {
                found.push(Violation::new(
                    "isInteger",
                    format!("only applies to number items, not {}", self.field_type),
                ));
            }
        }

        for (field, bound) in [("minVal", self.min_val), ("maxVal", self.max_val)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    found.push(Violation::new(field, "must be a finite number"));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_val, self.max_val) {
            if min > max {
                found.push(Violation::new(
                    "minVal",
                    format!("{} is greater than maxVal {}", min, max),
                ));
            }
        }

        if let Some(default) = &self.default_value {
            if default.field_type() != self.field_type {
                found.push(Violation::new(
                    "defaultValue",
                    format!(
                        "is a {} but the item is a {}",
                        default.field_type(),
                        self.field_type
                    ),
                ));
            }
        }

        found
    }

    /// Validates the item, reporting all violations together.
    pub fn validate(&self) -> Result<(), ViolationList> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ViolationList {
                item: self.name.clone(),
                violations,
            })
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_item::FieldValue;
    use proptest::prelude::*;

    fn number_item() -> LineItem {
        LineItem::new("quantity", FieldType::Number, "How many?")
    }

    #[test]
    fn well_formed_item_is_valid() {
        let item = number_item().with_bounds(Some(1.0), Some(10.0)).integer();
        assert!(item.validate().is_ok());
    }

    #[test]
    fn optional_item_without_companions_reports_both() {
        let mut item = LineItem::new("notes", FieldType::String, "Any notes?");
        item.is_optional = true;

        let err = item.validate().unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["preliminaryPrompt", "helpDocument"]);
    }

    #[test]
    fn collects_every_violation_not_just_the_first() {
        let mut item = LineItem::new("", FieldType::Boolean, "")
            .with_valid_values(Vec::<String>::new());
        item.is_optional = true;

        let err = item.validate().unwrap_err();
        // name, prompt, preliminaryPrompt, helpDocument, type misuse, empty list
        assert_eq!(err.len(), 6);
    }

    #[test]
    fn inverted_bounds_are_reported() {
        let item = number_item().with_bounds(Some(10.0), Some(1.0));
        let err = item.validate().unwrap_err();
        assert!(err.to_string().contains("10 is greater than maxVal 1"));
    }

    #[test]
    fn number_constraints_on_string_item_are_reported() {
        let item = LineItem::new("color", FieldType::String, "Which color?")
            .with_bounds(Some(1.0), None)
            .with_units("cm");
        let err = item.validate().unwrap_err();
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn mismatched_default_value_is_reported() {
        let item = number_item().with_default(FieldValue::Text("lots".to_string()));
        let err = item.validate().unwrap_err();
        assert_eq!(err.violations[0].field, "defaultValue");
    }

    #[test]
    fn violation_list_renders_one_line_per_violation() {
        let item = LineItem::new("", FieldType::String, "");
        let rendered = item.validate().unwrap_err().to_string();

        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.starts_with("line item '' has 2 violation(s):"));
    }

    #[test]
    fn validation_never_mutates_input() {
        let item = number_item().with_bounds(Some(5.0), Some(2.0));
        let before = item.clone();
        let _ = item.validate();
        assert_eq!(item, before);
    }

    proptest! {
        #[test]
        fn bounds_ordering_decides_validity(min in -1.0e6f64..1.0e6, max in -1.0e6f64..1.0e6) {
            let item = number_item().with_bounds(Some(min), Some(max));
            prop_assert_eq!(item.validate().is_ok(), min <= max);
        }
    }
}
