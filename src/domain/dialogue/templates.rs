//! Prompt templates for the classification calls.
//!
//! Placeholders use `{{name}}` syntax and are filled by [`render`].

use std::collections::HashMap;

use super::category::{Category, ClassificationMode, HelpCategory, MainCategory, PreliminaryCategory};

pub const PRELIMINARY_TEMPLATE: &str = r#"You are {{agentName}}, collecting a bill of materials from {{userName}}.
You asked whether they want to provide an optional item:
"{{question}}"

Recent conversation (oldest first):
{{recentMessages}}

Decide how the user's latest reply relates to that question.
Categories:
- TRUE: they want to provide this item
- FALSE: they do not want to provide this item
- HELP: they want more information before deciding
- CANCEL: they want to stop the whole conversation

Respond with a JSON object: {"category": one of [{{categories}}], "text": a short reply to the user}"#;

pub const MAIN_TEMPLATE: &str = r#"You are {{agentName}}, collecting a bill of materials from {{userName}}.
You are asking for the field "{{fieldName}}" ({{fieldType}}):
"{{question}}"

Recent conversation (oldest first):
{{recentMessages}}

Decide how the user's latest reply relates to that question.
Categories:
- RESULT: they answered; put the value they gave in "text"
- CHANGE: they want to change their previous answer
- HELP: they do not understand the question or want guidance
- CANCEL: they want to stop the whole conversation

Respond with a JSON object: {"category": one of [{{categories}}], "text": the extracted value or a short reply}"#;

pub const HELP_TEMPLATE: &str = r#"You are {{agentName}}, helping {{userName}} understand the field "{{fieldName}}".
Reference material:
{{helpDocument}}

The pending question is:
"{{question}}"

Recent conversation (oldest first):
{{recentMessages}}

Decide how the user's latest reply relates to the help discussion.
Categories:
- ANSWERED: their doubt is resolved or they are answering the question now
- CONFUSED: they are still confused
- HELP: they have another question about the field
- CANCEL: they want to stop the whole conversation

Respond with a JSON object: {"category": one of [{{categories}}], "text": a short reply}"#;

pub const HELP_ANSWER_TEMPLATE: &str = r#"You are {{agentName}}, helping {{userName}} with the field "{{fieldName}}".
Reference material:
{{helpDocument}}

The pending question is:
"{{question}}"

Recent conversation (oldest first):
{{recentMessages}}

Answer the user's latest question using only the reference material. Be brief and friendly.
Respond with a JSON object: {"category": "ANSWER", "text": your answer}"#;

/// Reply sent when the model output could not be classified.
pub const RETRY_APOLOGY: &str = "Sorry, I didn't quite catch that.";

/// Help text used when a line item has no help document.
pub const NO_HELP_DOCUMENT: &str = "(no additional reference material is available)";

/// Values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    values: HashMap<&'static str, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Returns the template for `mode`.
pub fn template_for(mode: ClassificationMode) -> &'static str {
    match mode {
        ClassificationMode::Preliminary => PRELIMINARY_TEMPLATE,
        ClassificationMode::Main => MAIN_TEMPLATE,
        ClassificationMode::Help => HELP_TEMPLATE,
        ClassificationMode::HelpAnswer => HELP_ANSWER_TEMPLATE,
    }
}

/// Comma-separated category labels offered to the model in `mode`.
pub fn categories_for(mode: ClassificationMode) -> String {
    let labels = match mode {
        ClassificationMode::Preliminary => PreliminaryCategory::offered_labels(),
        ClassificationMode::Main => MainCategory::offered_labels(),
        ClassificationMode::Help => HelpCategory::offered_labels(),
        ClassificationMode::HelpAnswer => vec!["ANSWER"],
    };
    labels.join(", ")
}

/// Replaces every `{{key}}` in `template`. Unknown placeholders become empty.
pub fn render(template: &str, context: &PromptContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                out.push_str(context.get(key).unwrap_or_default());
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_known_placeholders() {
        let ctx = PromptContext::new().with("agentName", "Scout").with("question", "How many?");
        let out = render("I am {{agentName}}. {{ question }}", &ctx);
        assert_eq!(out, "I am Scout. How many?");
    }

    #[test]
    fn render_blanks_unknown_placeholders() {
        let out = render("a{{missing}}b", &PromptContext::new());
        assert_eq!(out, "ab");
    }

    #[test]
    fn render_keeps_unterminated_braces() {
        let out = render("a {{oops", &PromptContext::new());
        assert_eq!(out, "a {{oops");
    }

    #[test]
    fn render_leaves_single_braces_alone() {
        let out = render(r#"{"category": "{{c}}"}"#, &PromptContext::new().with("c", "X"));
        assert_eq!(out, r#"{"category": "X"}"#);
    }

    #[test]
    fn main_template_lists_main_categories() {
        let ctx = PromptContext::new().with("categories", categories_for(ClassificationMode::Main));
        let out = render(template_for(ClassificationMode::Main), &ctx);
        assert!(out.contains("CANCEL, CHANGE, HELP, RESULT"));
        assert!(!out.contains("{{"));
    }
}
