//! Final pass/fail decision over aggregated scores and violations.

use serde::{Deserialize, Serialize};

use crate::config::SafetyConfig;
use crate::finding::Violation;
use crate::scoring::ScoreCard;
use crate::types::{SafetyLevel, Severity};

/// Outcome of the decision engine, with the reasons behind a rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the content passed.
    pub passed: bool,
    /// Why the content failed; empty on a pass.
    pub reasons: Vec<String>,
}

impl Decision {
    fn pass() -> Self {
        Self {
            passed: true,
            reasons: Vec::new(),
        }
    }
}

/// Applies score floors and the strictness gate.
///
/// Two tiers: hard score floors first, then a strictness-scaled
/// tolerance for high-severity violations. A critical violation fails
/// unconditionally, independent of scores.
pub fn decide(scores: &ScoreCard, violations: &[Violation], config: &SafetyConfig) -> Decision {
    if violations.iter().any(Violation::is_critical) {
        return Decision {
            passed: false,
            reasons: vec!["Critical violation present".to_string()],
        };
    }

    let mut reasons = Vec::new();

    if scores.safety < config.minimum_safety_score {
        reasons.push(format!(
            "Safety score {:.1} below minimum {:.1}",
            scores.safety, config.minimum_safety_score
        ));
    }
    if scores.age_appropriateness < config.minimum_age_appropriateness_score {
        reasons.push(format!(
            "Age-appropriateness score {:.1} below minimum {:.1}",
            scores.age_appropriateness, config.minimum_age_appropriateness_score
        ));
    }
    if scores.educational < config.minimum_educational_score {
        reasons.push(format!(
            "Educational score {:.1} below minimum {:.1}",
            scores.educational, config.minimum_educational_score
        ));
    }

    let high_count = violations
        .iter()
        .filter(|v| v.severity == Severity::High)
        .count();

    match config.safety_level {
        SafetyLevel::Strict if high_count >= 1 => {
            reasons.push(format!(
                "{high_count} high-severity violation(s) not tolerated at strict level"
            ));
        }
        SafetyLevel::Moderate if high_count > 1 => {
            reasons.push(format!(
                "{high_count} high-severity violations exceed the moderate-level tolerance of one"
            ));
        }
        _ => {}
    }

    if reasons.is_empty() {
        Decision::pass()
    } else {
        Decision {
            passed: false,
            reasons,
        }
    }
}
