//! Typed values and their extraction from model-provided answer text.
//!
//! The model's RESULT text is free-form ("I'll take the red one"), so every
//! field type has a coercion rule that either yields a value satisfying the
//! line item's constraints or a rejection the user can act on.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::schema::{FieldType, LineItem};

/// A collected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// The field type this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Text(_) => FieldType::String,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Why an answer could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueRejection {
    #[error("I didn't catch an answer there.")]
    Empty,

    #[error("\"{answer}\" isn't one of the available choices ({choices}).")]
    NotAChoice { answer: String, choices: String },

    #[error("That matches more than one choice ({matches}); please pick just one.")]
    AmbiguousChoice { matches: String },

    #[error("I couldn't find a number in \"{answer}\".")]
    NotANumber { answer: String },

    #[error("{value} needs to be a whole number.")]
    NotAnInteger { value: f64 },

    #[error("{value} is below the minimum of {min}.")]
    BelowMinimum { value: f64, min: f64 },

    #[error("{value} is above the maximum of {max}.")]
    AboveMaximum { value: f64, max: f64 },

    #[error("I couldn't tell whether that was a yes or a no.")]
    NotABoolean,
}

static AFFIRMATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "yes", "y", "yeah", "yep", "yup", "true", "sure", "ok", "okay", "correct",
        "affirmative", "definitely", "absolutely",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["no", "n", "nope", "nah", "false", "negative", "never", "not"]
        .into_iter()
        .collect()
});

impl LineItem {
    /// Coerces an answer into a value that satisfies this item's constraints.
    pub fn extract_value(&self, answer: &str) -> Result<FieldValue, ValueRejection> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValueRejection::Empty);
        }

        match self.field_type {
            FieldType::String => self.extract_text(answer),
            FieldType::Number => self.extract_number(answer),
            FieldType::Boolean => extract_boolean(answer),
        }
    }

    fn extract_text(&self, answer: &str) -> Result<FieldValue, ValueRejection> {
        let Some(choices) = &self.list_of_valid_values else {
            return Ok(FieldValue::Text(answer.to_string()));
        };

        if let Some(exact) = choices.iter().find(|c| c.eq_ignore_ascii_case(answer)) {
            return Ok(FieldValue::Text(exact.clone()));
        }

        let lowered = answer.to_lowercase();
        let mut matches: Vec<&String> = choices
            .iter()
            .filter(|choice| contains_phrase(&lowered, &choice.to_lowercase()))
            .collect();
        matches.dedup_by(|a, b| a.as_str().eq_ignore_ascii_case(b.as_str()));

        match matches.as_slice() {
            [single] => Ok(FieldValue::Text((*single).clone())),
            [] => Err(ValueRejection::NotAChoice {
                answer: answer.to_string(),
                choices: choices.join(", "),
            }),
            several => Err(ValueRejection::AmbiguousChoice {
                matches: several
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn extract_number(&self, answer: &str) -> Result<FieldValue, ValueRejection> {
        let value = first_number(answer).ok_or_else(|| ValueRejection::NotANumber {
            answer: answer.to_string(),
        })?;

        if self.requires_integer() && value.fract() != 0.0 {
            return Err(ValueRejection::NotAnInteger { value });
        }
        if let Some(min) = self.min_val {
            if value < min {
                return Err(ValueRejection::BelowMinimum { value, min });
            }
        }
        if let Some(max) = self.max_val {
            if value > max {
                return Err(ValueRejection::AboveMaximum { value, max });
            }
        }
        Ok(FieldValue::Number(value))
    }
}

fn extract_boolean(answer: &str) -> Result<FieldValue, ValueRejection> {
    let words = words(&answer.to_lowercase());
    let yes = words.iter().any(|w| AFFIRMATIVE.contains(w.as_str()));
    let no = words.iter().any(|w| NEGATIVE.contains(w.as_str()));

    match (yes, no) {
        (true, false) => Ok(FieldValue::Boolean(true)),
        (false, true) => Ok(FieldValue::Boolean(false)),
        _ => Err(ValueRejection::NotABoolean),
    }
}

/// Splits into alphanumeric words, keeping inner apostrophes.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole-word (or whole-phrase) containment.
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let hay = words(haystack);
    let needle = words(phrase);
    if needle.is_empty() || needle.len() > hay.len() {
        return false;
    }
    hay.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// First numeric token, allowing a sign, thousands separators and decimals.
fn first_number(text: &str) -> Option<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let starts_number = chars[i].is_ascii_digit()
            || (matches!(chars[i], '-' | '.')
                && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()));
        if !starts_number {
            i += 1;
            continue;
        }

        let mut token = String::new();
        if chars[i] == '-' {
            token.push('-');
            i += 1;
        }
        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() || c == '.' {
                token.push(c);
            } else if c == ',' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()) {
                // thousands separator
            } else {
                break;
            }
            i += 1;
        }
        let token = token.trim_end_matches('.');
        if let Ok(value) = token.parse::<f64>() {
            return Some(value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> LineItem {
        LineItem::new("color", FieldType::String, "Which color?").with_valid_values(["red", "blue"])
    }

    fn quantity() -> LineItem {
        LineItem::new("quantity", FieldType::Number, "How many?")
            .with_bounds(Some(1.0), Some(500.0))
            .integer()
    }

    #[test]
    fn choice_is_picked_out_of_a_sentence() {
        let value = color().extract_value("I'll take the red one").unwrap();
        assert_eq!(value, FieldValue::Text("red".to_string()));
    }

    #[test]
    fn choice_match_is_case_insensitive_and_returns_canonical_spelling() {
        let value = color().extract_value("BLUE").unwrap();
        assert_eq!(value, FieldValue::Text("blue".to_string()));
    }

    #[test]
    fn choice_must_be_a_whole_word() {
        let err = color().extract_value("reddish please").unwrap_err();
        assert!(matches!(err, ValueRejection::NotAChoice { .. }));
    }

    #[test]
    fn two_choices_in_one_answer_are_ambiguous() {
        let err = color().extract_value("red or blue, whatever").unwrap_err();
        assert!(matches!(err, ValueRejection::AmbiguousChoice { .. }));
    }

    #[test]
    fn multi_word_choices_match_as_phrases() {
        let item = LineItem::new("finish", FieldType::String, "Finish?")
            .with_valid_values(["matte black", "gloss white"]);
        let value = item.extract_value("go with matte black I think").unwrap();
        assert_eq!(value, FieldValue::Text("matte black".to_string()));
    }

    #[test]
    fn free_text_is_trimmed() {
        let item = LineItem::new("notes", FieldType::String, "Notes?");
        let value = item.extract_value("  leave at the door  ").unwrap();
        assert_eq!(value, FieldValue::Text("leave at the door".to_string()));
    }

    #[test]
    fn number_is_read_from_sentence() {
        let err = quantity().extract_value("about 1,200 maybe").unwrap_err();
        assert_eq!(err, ValueRejection::AboveMaximum { value: 1200.0, max: 500.0 });

        let value = quantity().extract_value("let's say 42 units").unwrap();
        assert_eq!(value, FieldValue::Number(42.0));
    }

    #[test]
    fn fractional_answer_rejected_for_integer_items() {
        let err = quantity().extract_value("2.5").unwrap_err();
        assert_eq!(err, ValueRejection::NotAnInteger { value: 2.5 });
    }

    #[test]
    fn number_below_minimum_is_rejected() {
        let err = quantity().extract_value("0").unwrap_err();
        assert_eq!(err, ValueRejection::BelowMinimum { value: 0.0, min: 1.0 });
    }

    #[test]
    fn negative_and_decimal_numbers_parse() {
        assert_eq!(first_number("it was -3.5 degrees"), Some(-3.5));
        assert_eq!(first_number("costs .75 each"), Some(0.75));
        assert_eq!(first_number("no digits here"), None);
        assert_eq!(first_number("ends with 7."), Some(7.0));
    }

    #[test]
    fn boolean_words_map_to_values() {
        let item = LineItem::new("gift", FieldType::Boolean, "Gift wrap?");
        assert_eq!(item.extract_value("Yes please").unwrap(), FieldValue::Boolean(true));
        assert_eq!(item.extract_value("nope").unwrap(), FieldValue::Boolean(false));
    }

    #[test]
    fn contradictory_boolean_is_rejected() {
        let item = LineItem::new("gift", FieldType::Boolean, "Gift wrap?");
        let err = item.extract_value("yes no maybe").unwrap_err();
        assert_eq!(err, ValueRejection::NotABoolean);
    }

    #[test]
    fn blank_answer_is_rejected() {
        assert_eq!(color().extract_value("  ").unwrap_err(), ValueRejection::Empty);
    }

    #[test]
    fn field_value_deserializes_untagged() {
        let v: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FieldValue::Boolean(true));
        let v: FieldValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, FieldValue::Number(3.0));
        let v: FieldValue = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(v, FieldValue::Text("red".to_string()));
    }
}
