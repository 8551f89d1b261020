//! # Classification Gate
//!
//! Compares a viewer's clearance against content classification using a
//! fixed total order:
//!
//! `UNCLASS < CUI < SECRET < TOP_SECRET < TOP_SECRET_SCI`
//!
//! Formatting a level together with caveats for display lives with the views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AccessError;
use crate::observability::{log_event_with_fields, Event};

/// Classification level, declared lowest to highest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationLevel {
    #[default]
    #[serde(rename = "UNCLASS")]
    Unclassified,
    Cui,
    Secret,
    TopSecret,
    TopSecretSci,
}

impl ClassificationLevel {
    /// All levels in ascending order
    pub const ALL: [ClassificationLevel; 5] = [
        ClassificationLevel::Unclassified,
        ClassificationLevel::Cui,
        ClassificationLevel::Secret,
        ClassificationLevel::TopSecret,
        ClassificationLevel::TopSecretSci,
    ];

    pub const LOWEST: ClassificationLevel = ClassificationLevel::Unclassified;
    pub const HIGHEST: ClassificationLevel = ClassificationLevel::TopSecretSci;

    /// Position in the hierarchy, 0 = lowest
    pub fn rank(&self) -> u8 {
        match self {
            ClassificationLevel::Unclassified => 0,
            ClassificationLevel::Cui => 1,
            ClassificationLevel::Secret => 2,
            ClassificationLevel::TopSecret => 3,
            ClassificationLevel::TopSecretSci => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLevel::Unclassified => "UNCLASS",
            ClassificationLevel::Cui => "CUI",
            ClassificationLevel::Secret => "SECRET",
            ClassificationLevel::TopSecret => "TOP_SECRET",
            ClassificationLevel::TopSecretSci => "TOP_SECRET_SCI",
        }
    }
}

impl fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClassificationLevel {
    type Err = AccessError;

    /// Accepts the wire names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AccessError::UnknownClassification(s.to_string()))
    }
}

/// True iff `held` ranks at or above `required`
pub fn meets_level(held: ClassificationLevel, required: ClassificationLevel) -> bool {
    held.rank() >= required.rank()
}

/// Highest level in `levels`; `UNCLASS` when empty
pub fn highest_of<I>(levels: I) -> ClassificationLevel
where
    I: IntoIterator<Item = ClassificationLevel>,
{
    levels
        .into_iter()
        .max_by_key(|level| level.rank())
        .unwrap_or(ClassificationLevel::LOWEST)
}

/// Parse an untrusted clearance. Unknown labels become the lowest level.
pub fn held_or_lowest(label: &str) -> ClassificationLevel {
    label.parse().unwrap_or_else(|_| {
        log_event_with_fields(
            Event::ClassificationUnknown,
            &[("label", label), ("position", "held"), ("resolved", "UNCLASS")],
        );
        ClassificationLevel::LOWEST
    })
}

/// Parse an untrusted content label. Unknown labels become the highest level.
pub fn required_or_highest(label: &str) -> ClassificationLevel {
    label.parse().unwrap_or_else(|_| {
        log_event_with_fields(
            Event::ClassificationUnknown,
            &[
                ("label", label),
                ("position", "required"),
                ("resolved", "TOP_SECRET_SCI"),
            ],
        );
        ClassificationLevel::HIGHEST
    })
}
