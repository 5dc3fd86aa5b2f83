//! Question builder.
//!
//! Renders the text sent to the user for an objective, decorated with the
//! constraint phrasing that matches the line item's type.

use crate::domain::goal::Objective;
use crate::domain::line_item::{FieldType, LineItem};

use super::errors::DialogueError;

/// Builds the question for `objective`.
///
/// Optional items that still wait for the user's interest get their
/// preliminary prompt instead of the main prompt.
pub fn build_question(objective: &Objective) -> Result<String, DialogueError> {
    let item = objective.line_item();

    if objective.awaits_preference() {
        return item
            .preliminary_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                DialogueError::protocol(format!(
                    "optional line item '{}' has no preliminary prompt",
                    item.name
                ))
            });
    }

    let prompt = item.prompt.trim();
    let decoration = match item.field_type {
        FieldType::String => choices_clause(item),
        FieldType::Number => bounds_clause(item)?,
        FieldType::Boolean => None,
    };

    Ok(match decoration {
        Some(clause) => format!("{} {}", prompt, clause),
        None => prompt.to_string(),
    })
}

fn choices_clause(item: &LineItem) -> Option<String> {
    let values = item.list_of_valid_values.as_ref()?;
    if values.is_empty() {
        return None;
    }
    Some(format!("Available choices: {}.", values.join(", ")))
}

fn bounds_clause(item: &LineItem) -> Result<Option<String>, DialogueError> {
    let noun = if item.requires_integer() {
        "a whole number"
    } else {
        "a number"
    };
    let units = item
        .units_description
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());

    let range = match (item.min_val, item.max_val) {
        (Some(min), Some(max)) if min > max => {
            return Err(DialogueError::protocol(format!(
                "line item '{}' reached the question builder with minVal {} greater than maxVal {}",
                item.name, min, max
            )));
        }
        (Some(min), Some(max)) => Some(format!("Please give {} between {} and {}", noun, min, max)),
        (Some(min), None) => Some(format!("Please give {} of at least {}", noun, min)),
        (None, Some(max)) => Some(format!("Please give {} no greater than {}", noun, max)),
        (None, None) if item.requires_integer() => Some(format!("Please give {}", noun)),
        (None, None) => None,
    };

    Ok(match (range, units) {
        (Some(range), Some(units)) => Some(format!("{} ({}).", range, units)),
        (Some(range), None) => Some(format!("{}.", range)),
        (None, Some(units)) => Some(format!("({})", units)),
        (None, None) => None,
    })
}
