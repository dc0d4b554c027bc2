//! Score aggregation across all pipeline stages.

use serde::{Deserialize, Serialize};

use crate::config::ScoringWeights;
use crate::finding::{Violation, ViolationKind, Warning, WarningKind};
use crate::terms::{AllowCategory, AllowlistEntry};
use crate::types::AgeGroup;

/// The three component scores of a safety check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Safety score in [0, 100].
    pub safety: f64,
    /// Age-appropriateness score in [0, 100].
    pub age_appropriateness: f64,
    /// Educational-value score in [0, 100].
    pub educational: f64,
}

impl ScoreCard {
    /// The arithmetic mean of the three component scores.
    pub fn overall(&self) -> f64 {
        (self.safety + self.age_appropriateness + self.educational) / 3.0
    }
}

/// Fuses violations, warnings, and allowlist boosts into a score card.
///
/// Order matters: deductions first, then boosts, then a single clamp to
/// [0, 100] per bucket. This lets positive content partially offset
/// warnings (but not erase violations) within the same check.
///
/// Safety and age-appropriateness start at 100; educational starts at a
/// neutral 50 because absence of educational signal is not itself a
/// fault.
pub fn aggregate_scores(
    violations: &[Violation],
    warnings: &[Warning],
    allowlist: &[AllowlistEntry],
    content: &str,
    age_group: AgeGroup,
    weights: &ScoringWeights,
) -> ScoreCard {
    let mut safety = 100.0;
    let mut age = 100.0;
    let mut educational = 50.0;

    for violation in violations {
        let deduction = weights.violation_deduction(violation.severity);
        match violation.kind {
            ViolationKind::ExternalSignal | ViolationKind::CustomFilter | ViolationKind::TermList => {
                safety -= deduction;
            }
            ViolationKind::AgeInappropriate => age -= deduction,
            ViolationKind::EducationalConcern => educational -= deduction,
        }
    }

    for warning in warnings {
        let deduction = match warning.kind {
            WarningKind::Complexity => weights.complexity_warning_deduction,
            _ => weights.warning_deduction,
        };
        match warning.kind {
            WarningKind::Educational => educational -= deduction,
            WarningKind::Vocabulary
            | WarningKind::Theme
            | WarningKind::Complexity
            | WarningKind::Cultural => age -= deduction,
        }
    }

    for entry in allowlist {
        if !entry.applies_to(age_group) || !entry.matches(content) {
            continue;
        }
        match entry.category {
            AllowCategory::Educational => educational += entry.boost,
            AllowCategory::Positive | AllowCategory::Creative | AllowCategory::Safe => {
                age += entry.boost / 2.0;
                safety += entry.boost / 4.0;
            }
        }
    }

    ScoreCard {
        safety: safety.clamp(0.0, 100.0),
        age_appropriateness: age.clamp(0.0, 100.0),
        educational: educational.clamp(0.0, 100.0),
    }
}
