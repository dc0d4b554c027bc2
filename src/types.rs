//! Core enums shared across the safety pipeline.

use serde::{Deserialize, Serialize};

/// Audience age band that selects which rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// Ages roughly 1-3.
    Toddler,
    /// Ages roughly 3-5.
    Preschool,
    /// Ages roughly 5-10.
    Elementary,
}

impl AgeGroup {
    /// Returns all age groups.
    pub fn all() -> &'static [AgeGroup] {
        &[AgeGroup::Toddler, AgeGroup::Preschool, AgeGroup::Elementary]
    }

    /// Returns a human-readable name for this age group.
    pub fn name(&self) -> &'static str {
        match self {
            AgeGroup::Toddler => "Toddler",
            AgeGroup::Preschool => "Preschool",
            AgeGroup::Elementary => "Elementary",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Operator-chosen strictness governing tolerance for violations
/// beyond the score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    /// Reject on any high-severity violation.
    Strict,
    /// Tolerate a single high-severity violation.
    Moderate,
    /// Score thresholds alone govern.
    Relaxed,
}

impl SafetyLevel {
    /// Returns all safety levels.
    pub fn all() -> &'static [SafetyLevel] {
        &[
            SafetyLevel::Strict,
            SafetyLevel::Moderate,
            SafetyLevel::Relaxed,
        ]
    }

    /// Returns a human-readable name for this level.
    pub fn name(&self) -> &'static str {
        match self {
            SafetyLevel::Strict => "Strict",
            SafetyLevel::Moderate => "Moderate",
            SafetyLevel::Relaxed => "Relaxed",
        }
    }

    /// Returns the default minimum scores for this level as
    /// `(safety, age_appropriateness, educational)`.
    pub fn default_minimum_scores(&self) -> (f64, f64, f64) {
        match self {
            SafetyLevel::Strict => (90.0, 95.0, 70.0),
            SafetyLevel::Moderate => (75.0, 80.0, 50.0),
            SafetyLevel::Relaxed => (60.0, 65.0, 30.0),
        }
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Kind of generated content being checked.
///
/// Structural checks (sentence length, content length, required themes)
/// only apply to [`ContentType::Story`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A full story text.
    Story,
    /// A story outline.
    Outline,
    /// A revision of existing story text.
    Revision,
    /// A generation prompt.
    Prompt,
}

impl ContentType {
    /// Returns a human-readable name for this content type.
    pub fn name(&self) -> &'static str {
        match self {
            ContentType::Story => "Story",
            ContentType::Outline => "Outline",
            ContentType::Revision => "Revision",
            ContentType::Prompt => "Prompt",
        }
    }
}

/// Severity of a violation finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Minor concern.
    Low,
    /// Moderate concern.
    Medium,
    /// Serious concern; strictness levels gate on this.
    High,
    /// Always forces rejection, regardless of scores.
    Critical,
}

impl Severity {
    /// Returns a human-readable name for this severity.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_group_all_returns_all_variants() {
        assert_eq!(AgeGroup::all().len(), 3);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn safety_level_default_scores() {
        assert_eq!(
            SafetyLevel::Strict.default_minimum_scores(),
            (90.0, 95.0, 70.0)
        );
        assert_eq!(
            SafetyLevel::Moderate.default_minimum_scores(),
            (75.0, 80.0, 50.0)
        );
        assert_eq!(
            SafetyLevel::Relaxed.default_minimum_scores(),
            (60.0, 65.0, 30.0)
        );
    }

    #[test]
    fn enum_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&AgeGroup::Preschool).unwrap(),
            "\"preschool\""
        );
        assert_eq!(
            serde_json::to_string(&SafetyLevel::Relaxed).unwrap(),
            "\"relaxed\""
        );
        assert_eq!(
            serde_json::to_string(&ContentType::Story).unwrap(),
            "\"story\""
        );
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
    }

    #[test]
    fn severity_roundtrip() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::High);
    }
}
