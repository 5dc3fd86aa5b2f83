//! Classification categories, one closed set per classification mode.
//!
//! Model output is matched case-insensitively against the active mode's
//! set; anything else (including a missing category) becomes `Retry`.

use std::fmt::Debug;

/// Which classification call is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationMode {
    /// Interest check for an optional item.
    Preliminary,
    /// Value extraction for the current objective.
    Main,
    /// Classification while the objective is in help mode.
    Help,
    /// Free-form help answer; category is ignored.
    HelpAnswer,
}

impl std::fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClassificationMode::Preliminary => "preliminary",
            ClassificationMode::Main => "main",
            ClassificationMode::Help => "help",
            ClassificationMode::HelpAnswer => "help_answer",
        };
        write!(f, "{}", s)
    }
}

/// A closed category set for one classification mode.
pub trait Category: Copy + PartialEq + Debug + Send + Sync + Sized + 'static {
    const MODE: ClassificationMode;

    /// Every label the model may return, paired with its variant.
    const LABELS: &'static [(&'static str, Self)];

    /// Fallback for unknown or missing labels.
    const RETRY: Self;

    /// Maps raw model output onto the set. Never fails.
    fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::RETRY;
        };
        Self::LABELS
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(raw))
            .map(|(_, category)| *category)
            .unwrap_or(Self::RETRY)
    }

    /// Labels offered to the model in the prompt (the synthetic retry excluded).
    fn offered_labels() -> Vec<&'static str> {
        Self::LABELS
            .iter()
            .filter(|(_, category)| *category != Self::RETRY)
            .map(|(label, _)| *label)
            .collect()
    }

    fn is_retry(&self) -> bool {
        *self == Self::RETRY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreliminaryCategory {
    Cancel,
    True,
    False,
    Help,
    Retry,
}

impl Category for PreliminaryCategory {
    const MODE: ClassificationMode = ClassificationMode::Preliminary;
    const LABELS: &'static [(&'static str, Self)] = &[
        ("CANCEL", Self::Cancel),
        ("TRUE", Self::True),
        ("FALSE", Self::False),
        ("HELP", Self::Help),
        ("RETRY", Self::Retry),
    ];
    const RETRY: Self = Self::Retry;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCategory {
    Cancel,
    Change,
    Help,
    Result,
    Retry,
}

impl Category for MainCategory {
    const MODE: ClassificationMode = ClassificationMode::Main;
    const LABELS: &'static [(&'static str, Self)] = &[
        ("CANCEL", Self::Cancel),
        ("CHANGE", Self::Change),
        ("HELP", Self::Help),
        ("RESULT", Self::Result),
        ("RETRY", Self::Retry),
    ];
    const RETRY: Self = Self::Retry;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpCategory {
    Answered,
    Cancel,
    Confused,
    Help,
    Retry,
}

impl Category for HelpCategory {
    const MODE: ClassificationMode = ClassificationMode::Help;
    const LABELS: &'static [(&'static str, Self)] = &[
        ("ANSWERED", Self::Answered),
        ("CANCEL", Self::Cancel),
        ("CONFUSED", Self::Confused),
        ("HELP", Self::Help),
        ("RETRY", Self::Retry),
    ];
    const RETRY: Self = Self::Retry;
}

/// A normalized classification: the category plus the model's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<C: Category> {
    pub category: C,
    pub text: String,
    /// True when the raw category was missing or unknown.
    pub downgraded: bool,
}

impl<C: Category> Classification<C> {
    pub fn from_raw(category: Option<&str>, text: Option<&str>) -> Self {
        let normalized = C::normalize(category);
        let downgraded = normalized.is_retry()
            && !category
                .map(|c| c.trim().eq_ignore_ascii_case("RETRY"))
                .unwrap_or(false);
        Self {
            category: normalized,
            text: text.unwrap_or_default().trim().to_string(),
            downgraded,
        }
    }
}
