//! Safety configuration and scoring weights.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SafetyError};
use crate::types::{AgeGroup, SafetyLevel, Severity};

/// Default deadline for the external moderation call, in milliseconds.
pub const DEFAULT_EXTERNAL_TIMEOUT_MS: u64 = 3000;

/// Scoring constants used by the aggregator.
///
/// These are empirically tuned values with no documented derivation, so
/// they live in configuration rather than being hard-coded; recalibrate
/// against real content samples before trusting them in production.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Deduction for a critical violation.
    pub critical_deduction: f64,
    /// Deduction for a high violation.
    pub high_deduction: f64,
    /// Deduction for a medium violation.
    pub medium_deduction: f64,
    /// Deduction for a low violation.
    pub low_deduction: f64,
    /// Flat deduction for most warnings.
    pub warning_deduction: f64,
    /// Smaller deduction for complexity warnings.
    pub complexity_warning_deduction: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            critical_deduction: 50.0,
            high_deduction: 30.0,
            medium_deduction: 15.0,
            low_deduction: 5.0,
            warning_deduction: 5.0,
            complexity_warning_deduction: 2.5,
        }
    }
}

impl ScoringWeights {
    /// Returns the deduction for a violation of the given severity.
    pub fn violation_deduction(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical_deduction,
            Severity::High => self.high_deduction,
            Severity::Medium => self.medium_deduction,
            Severity::Low => self.low_deduction,
        }
    }

    fn validate(&self) -> Result<()> {
        let all = [
            ("critical_deduction", self.critical_deduction),
            ("high_deduction", self.high_deduction),
            ("medium_deduction", self.medium_deduction),
            ("low_deduction", self.low_deduction),
            ("warning_deduction", self.warning_deduction),
            (
                "complexity_warning_deduction",
                self.complexity_warning_deduction,
            ),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(SafetyError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration bound to one safety service instance.
///
/// Updates replace the whole struct atomically; concurrent checks never
/// observe a partially-applied update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Audience age band.
    pub age_group: AgeGroup,
    /// Operator strictness.
    pub safety_level: SafetyLevel,
    /// Whether the external moderation stage runs.
    pub enable_external_moderation: bool,
    /// Whether the structural/theme stage runs.
    pub enable_structural_filter: bool,
    /// Whether the term-list stage runs.
    pub enable_term_list_filter: bool,
    /// Minimum safety score in [0, 100].
    pub minimum_safety_score: f64,
    /// Minimum age-appropriateness score in [0, 100].
    pub minimum_age_appropriateness_score: f64,
    /// Minimum educational score in [0, 100].
    pub minimum_educational_score: f64,
    /// Deadline for the external moderation call, in milliseconds.
    pub external_timeout_ms: u64,
    /// Scoring constants for the aggregator.
    pub weights: ScoringWeights,
}

impl SafetyConfig {
    /// Creates a configuration with the level's default minimum scores.
    ///
    /// All stages are enabled except external moderation, which the
    /// service factory turns on only when a credential is supplied.
    pub fn for_level(age_group: AgeGroup, safety_level: SafetyLevel) -> Self {
        let (safety, age, educational) = safety_level.default_minimum_scores();
        Self {
            age_group,
            safety_level,
            enable_external_moderation: false,
            enable_structural_filter: true,
            enable_term_list_filter: true,
            minimum_safety_score: safety,
            minimum_age_appropriateness_score: age,
            minimum_educational_score: educational,
            external_timeout_ms: DEFAULT_EXTERNAL_TIMEOUT_MS,
            weights: ScoringWeights::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// Runs before every check; an invalid configuration trips the
    /// fail-closed boundary rather than producing a misleading pass.
    pub fn validate(&self) -> Result<()> {
        let scores = [
            ("minimum_safety_score", self.minimum_safety_score),
            (
                "minimum_age_appropriateness_score",
                self.minimum_age_appropriateness_score,
            ),
            ("minimum_educational_score", self.minimum_educational_score),
        ];
        for (name, value) in scores {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(SafetyError::InvalidConfig(format!(
                    "{name} must be in [0, 100], got {value}"
                )));
            }
        }
        if self.external_timeout_ms == 0 {
            return Err(SafetyError::InvalidConfig(
                "external_timeout_ms must be greater than zero".to_string(),
            ));
        }
        self.weights.validate()
    }
}

/// Partial configuration update.
///
/// Unset fields keep their current values; the result is applied as a
/// single whole-struct swap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// New age group, if changing.
    pub age_group: Option<AgeGroup>,
    /// New safety level, if changing.
    pub safety_level: Option<SafetyLevel>,
    /// Toggle for the external moderation stage.
    pub enable_external_moderation: Option<bool>,
    /// Toggle for the structural stage.
    pub enable_structural_filter: Option<bool>,
    /// Toggle for the term-list stage.
    pub enable_term_list_filter: Option<bool>,
    /// New minimum safety score.
    pub minimum_safety_score: Option<f64>,
    /// New minimum age-appropriateness score.
    pub minimum_age_appropriateness_score: Option<f64>,
    /// New minimum educational score.
    pub minimum_educational_score: Option<f64>,
    /// New external call deadline in milliseconds.
    pub external_timeout_ms: Option<u64>,
    /// New scoring weights.
    pub weights: Option<ScoringWeights>,
}

impl ConfigUpdate {
    /// Applies this update on top of an existing configuration and
    /// validates the result.
    pub fn apply(&self, base: &SafetyConfig) -> Result<SafetyConfig> {
        let next = SafetyConfig {
            age_group: self.age_group.unwrap_or(base.age_group),
            safety_level: self.safety_level.unwrap_or(base.safety_level),
            enable_external_moderation: self
                .enable_external_moderation
                .unwrap_or(base.enable_external_moderation),
            enable_structural_filter: self
                .enable_structural_filter
                .unwrap_or(base.enable_structural_filter),
            enable_term_list_filter: self
                .enable_term_list_filter
                .unwrap_or(base.enable_term_list_filter),
            minimum_safety_score: self.minimum_safety_score.unwrap_or(base.minimum_safety_score),
            minimum_age_appropriateness_score: self
                .minimum_age_appropriateness_score
                .unwrap_or(base.minimum_age_appropriateness_score),
            minimum_educational_score: self
                .minimum_educational_score
                .unwrap_or(base.minimum_educational_score),
            external_timeout_ms: self.external_timeout_ms.unwrap_or(base.external_timeout_ms),
            weights: self.weights.unwrap_or(base.weights),
        };
        next.validate()?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_level_uses_level_defaults() {
        let config = SafetyConfig::for_level(AgeGroup::Preschool, SafetyLevel::Moderate);
        assert_eq!(config.minimum_safety_score, 75.0);
        assert_eq!(config.minimum_age_appropriateness_score, 80.0);
        assert_eq!(config.minimum_educational_score, 50.0);
        assert!(!config.enable_external_moderation);
        assert!(config.enable_structural_filter);
        assert!(config.enable_term_list_filter);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_scores() {
        let mut config = SafetyConfig::for_level(AgeGroup::Toddler, SafetyLevel::Strict);
        config.minimum_safety_score = 150.0;
        assert!(config.validate().is_err());

        config.minimum_safety_score = -1.0;
        assert!(config.validate().is_err());

        config.minimum_safety_score = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = SafetyConfig::for_level(AgeGroup::Toddler, SafetyLevel::Strict);
        config.external_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_weights() {
        let mut config = SafetyConfig::for_level(AgeGroup::Toddler, SafetyLevel::Strict);
        config.weights.high_deduction = -30.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_weights_match_tuned_constants() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.violation_deduction(Severity::Critical), 50.0);
        assert_eq!(weights.violation_deduction(Severity::High), 30.0);
        assert_eq!(weights.violation_deduction(Severity::Medium), 15.0);
        assert_eq!(weights.violation_deduction(Severity::Low), 5.0);
        assert_eq!(weights.warning_deduction, 5.0);
        assert_eq!(weights.complexity_warning_deduction, 2.5);
    }

    #[test]
    fn config_update_applies_only_set_fields() {
        let base = SafetyConfig::for_level(AgeGroup::Preschool, SafetyLevel::Moderate);
        let update = ConfigUpdate {
            safety_level: Some(SafetyLevel::Strict),
            minimum_safety_score: Some(85.0),
            ..Default::default()
        };
        let next = update.apply(&base).unwrap();
        assert_eq!(next.safety_level, SafetyLevel::Strict);
        assert_eq!(next.minimum_safety_score, 85.0);
        // Untouched fields carried over
        assert_eq!(next.age_group, AgeGroup::Preschool);
        assert_eq!(next.minimum_age_appropriateness_score, 80.0);
    }

    #[test]
    fn config_update_rejects_invalid_result() {
        let base = SafetyConfig::for_level(AgeGroup::Preschool, SafetyLevel::Moderate);
        let update = ConfigUpdate {
            minimum_educational_score: Some(101.0),
            ..Default::default()
        };
        assert!(update.apply(&base).is_err());
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = SafetyConfig::for_level(AgeGroup::Elementary, SafetyLevel::Relaxed);
        let json = serde_json::to_string(&config).unwrap();
        let back: SafetyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
