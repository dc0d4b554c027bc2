//! Violation and warning findings produced by pipeline stages.

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// Which pipeline stage produced a set of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Third-party moderation classifier.
    ExternalModeration,
    /// Rule-table structural and theme checks.
    Structural,
    /// Blocklist term matching.
    TermList,
}

impl Stage {
    /// Returns a human-readable name for this stage.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ExternalModeration => "external_moderation",
            Stage::Structural => "structural",
            Stage::TermList => "term_list",
        }
    }
}

/// What kind of finding a violation is; determines which score bucket
/// its deduction applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Flagged by the external moderation classifier.
    ExternalSignal,
    /// Flagged by a custom filter.
    CustomFilter,
    /// Matched a blocklist entry.
    TermList,
    /// Violated an age-band theme rule.
    AgeInappropriate,
    /// Undermines educational value.
    EducationalConcern,
}

/// A hard finding that can force rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The kind of violation.
    pub kind: ViolationKind,
    /// How severe the violation is.
    pub severity: Severity,
    /// Category label (e.g. a moderation taxonomy name or term category).
    pub category: String,
    /// Human-readable description of the finding.
    pub description: String,
    /// The excerpt that triggered the finding, if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged_text: Option<String>,
    /// Suggested remediation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(
        kind: ViolationKind,
        severity: Severity,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            category: category.into(),
            description: description.into(),
            flagged_text: None,
            suggestion: None,
        }
    }

    /// Attaches the flagged excerpt.
    pub fn with_flagged_text(mut self, text: impl Into<String>) -> Self {
        self.flagged_text = Some(text.into());
        self
    }

    /// Attaches a remediation suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Returns true if this violation forces rejection on its own.
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// What kind of finding a warning is; determines which score bucket
/// its deduction applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Vocabulary concern from a low/medium blocklist match.
    Vocabulary,
    /// Thematic concern.
    Theme,
    /// Structural complexity concern (sentence or content length).
    Complexity,
    /// Cultural sensitivity concern.
    Cultural,
    /// Missing or weak educational signal.
    Educational,
}

/// A soft finding that only affects scores, never forces rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// The kind of warning.
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
    /// Suggested remediation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Warning {
    /// Creates a new warning.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attaches a remediation suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Result of running one pipeline stage.
///
/// Soft failure is first-class data: a stage that errored or was skipped
/// reports `applied = false` and contributes no findings, and the check
/// proceeds on the remaining stages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageOutcome {
    /// Violations found by this stage.
    pub violations: Vec<Violation>,
    /// Warnings found by this stage.
    pub warnings: Vec<Warning>,
    /// Whether the stage actually ran to completion.
    pub applied: bool,
}

impl StageOutcome {
    /// An applied stage with no findings.
    pub fn clean() -> Self {
        Self {
            violations: Vec::new(),
            warnings: Vec::new(),
            applied: true,
        }
    }

    /// An applied stage with the given findings.
    pub fn with_findings(violations: Vec<Violation>, warnings: Vec<Warning>) -> Self {
        Self {
            violations,
            warnings,
            applied: true,
        }
    }

    /// A stage that did not run (disabled, errored, or timed out).
    pub fn skipped() -> Self {
        Self {
            violations: Vec::new(),
            warnings: Vec::new(),
            applied: false,
        }
    }

    /// Returns true if this stage found anything.
    pub fn has_findings(&self) -> bool {
        !self.violations.is_empty() || !self.warnings.is_empty()
    }
}
