//! The value object returned from a safety check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finding::{Stage, Violation, ViolationKind, Warning};
use crate::scoring::ScoreCard;
use crate::types::{AgeGroup, ContentType, SafetyLevel, Severity};

/// Metadata recorded alongside a check result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckMetadata {
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
    /// Wall-clock duration of the check in milliseconds.
    pub processing_time_ms: u64,
    /// Stages that actually ran to completion.
    pub stages_applied: Vec<Stage>,
    /// The content type that was checked.
    pub content_type: ContentType,
    /// The age band the check was configured for.
    pub age_group: AgeGroup,
    /// The strictness level the check was configured for.
    pub safety_level: SafetyLevel,
}

/// Result of one content safety check.
///
/// Produced fresh per call and never mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSafetyResult {
    /// Final verdict.
    pub passed: bool,
    /// Safety score in [0, 100].
    pub safety_score: f64,
    /// Age-appropriateness score in [0, 100].
    pub age_appropriateness_score: f64,
    /// Educational-value score in [0, 100].
    pub educational_score: f64,
    /// Arithmetic mean of the three component scores.
    pub overall_score: f64,
    /// Hard findings.
    pub violations: Vec<Violation>,
    /// Soft findings.
    pub warnings: Vec<Warning>,
    /// Check metadata.
    pub metadata: CheckMetadata,
}

impl ContentSafetyResult {
    /// Assembles a result from the pipeline's outputs.
    pub fn from_pipeline(
        passed: bool,
        scores: ScoreCard,
        violations: Vec<Violation>,
        warnings: Vec<Warning>,
        metadata: CheckMetadata,
    ) -> Self {
        Self {
            passed,
            safety_score: scores.safety,
            age_appropriateness_score: scores.age_appropriateness,
            educational_score: scores.educational,
            overall_score: scores.overall(),
            violations,
            warnings,
            metadata,
        }
    }

    /// The fail-closed result produced when the pipeline itself breaks.
    ///
    /// All scores are zero, no stage is recorded as applied, and a single
    /// critical `system_error` violation describes the failure.
    pub fn failed_closed(description: impl Into<String>, metadata: CheckMetadata) -> Self {
        Self {
            passed: false,
            safety_score: 0.0,
            age_appropriateness_score: 0.0,
            educational_score: 0.0,
            overall_score: 0.0,
            violations: vec![Violation::new(
                ViolationKind::CustomFilter,
                Severity::Critical,
                "system_error",
                description,
            )],
            warnings: Vec::new(),
            metadata,
        }
    }

    /// Returns true if any violation is critical.
    pub fn has_critical_violation(&self) -> bool {
        self.violations.iter().any(Violation::is_critical)
    }
}
