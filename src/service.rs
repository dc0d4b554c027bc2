//! The safety service orchestrator.
//!
//! Owns the configuration and term lists, runs the enabled stages in
//! sequence, fuses their findings into scores, applies the decision
//! policy, and wraps the whole pipeline in a fail-closed guard.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::config::{ConfigUpdate, SafetyConfig};
use crate::decision::decide;
use crate::error::Result;
use crate::filter::{evaluate_structural, evaluate_term_list};
use crate::finding::Stage;
use crate::moderation::{run_external_stage, ModerationClient, TextClassifier};
use crate::result::{CheckMetadata, ContentSafetyResult};
use crate::rules::AgeRules;
use crate::scoring::aggregate_scores;
use crate::terms::{AllowlistEntry, BlocklistEntry, TermLists};
use crate::types::{AgeGroup, ContentType, SafetyLevel};

/// Immutable snapshot of the service's shared state.
///
/// Checks clone the `Arc` once at entry; administrative updates build a
/// new context and swap the reference, so a reader never observes a
/// partially-applied update.
#[derive(Debug, Clone)]
struct SafetyContext {
    config: SafetyConfig,
    terms: TermLists,
}

/// Age-aware content safety service.
///
/// Safe to share across tasks; checks are freely concurrent and only
/// the administrative operations mutate state (by whole-snapshot swap).
pub struct SafetyService {
    state: RwLock<Arc<SafetyContext>>,
    classifier: Option<Arc<dyn TextClassifier>>,
}

impl SafetyService {
    /// Creates a service for the given audience and strictness.
    ///
    /// Minimum scores default from the level. The external moderation
    /// stage is enabled only when an API credential is supplied.
    pub fn new(
        age_group: AgeGroup,
        safety_level: SafetyLevel,
        external_api_key: Option<String>,
    ) -> Self {
        let mut config = SafetyConfig::for_level(age_group, safety_level);
        let classifier: Option<Arc<dyn TextClassifier>> = match external_api_key {
            Some(key) => {
                config.enable_external_moderation = true;
                Some(Arc::new(ModerationClient::new(key)))
            }
            None => None,
        };

        tracing::info!(
            age_group = %age_group,
            safety_level = %safety_level,
            external_moderation = config.enable_external_moderation,
            "Safety service created"
        );

        Self {
            state: RwLock::new(Arc::new(SafetyContext {
                config,
                terms: TermLists::starter_defaults(),
            })),
            classifier,
        }
    }

    /// Creates a service with an injected classifier implementation.
    ///
    /// The external stage is enabled; use this to supply a self-hosted
    /// endpoint or a test double.
    pub fn with_classifier(
        age_group: AgeGroup,
        safety_level: SafetyLevel,
        classifier: Arc<dyn TextClassifier>,
    ) -> Self {
        let mut config = SafetyConfig::for_level(age_group, safety_level);
        config.enable_external_moderation = true;
        Self {
            state: RwLock::new(Arc::new(SafetyContext {
                config,
                terms: TermLists::starter_defaults(),
            })),
            classifier: Some(classifier),
        }
    }

    /// Creates a service from an explicit configuration and term lists.
    ///
    /// The configuration is validated at check time, not here; an
    /// invalid configuration makes every check fail closed.
    pub fn with_config(
        config: SafetyConfig,
        terms: TermLists,
        classifier: Option<Arc<dyn TextClassifier>>,
    ) -> Self {
        Self {
            state: RwLock::new(Arc::new(SafetyContext { config, terms })),
            classifier,
        }
    }

    fn snapshot(&self) -> Arc<SafetyContext> {
        // State is always swapped whole, so a poisoned lock still holds
        // a consistent snapshot; recover instead of propagating.
        match self.state.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Arc<SafetyContext>> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Checks one piece of generated content.
    ///
    /// Never returns an error: per-stage failures are absorbed as
    /// skipped stages, and anything escaping the pipeline boundary
    /// produces the fail-closed result (rejected, zero scores, one
    /// critical `system_error` violation).
    pub async fn check_content_safety(
        &self,
        content: &str,
        content_type: ContentType,
    ) -> ContentSafetyResult {
        let start = Instant::now();
        let ctx = self.snapshot();

        match self.run_pipeline(content, content_type, &ctx, start).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "Safety pipeline failed, failing closed");
                ContentSafetyResult::failed_closed(
                    format!("Safety check failed: {err}"),
                    CheckMetadata {
                        checked_at: Utc::now(),
                        processing_time_ms: start.elapsed().as_millis() as u64,
                        stages_applied: Vec::new(),
                        content_type,
                        age_group: ctx.config.age_group,
                        safety_level: ctx.config.safety_level,
                    },
                )
            }
        }
    }

    async fn run_pipeline(
        &self,
        content: &str,
        content_type: ContentType,
        ctx: &SafetyContext,
        start: Instant,
    ) -> Result<ContentSafetyResult> {
        ctx.config.validate()?;

        let mut stages_applied = Vec::new();
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        // The only stage that may suspend; bounded by its deadline and
        // soft-failing so an outage never blocks content generation.
        if ctx.config.enable_external_moderation {
            if let Some(classifier) = &self.classifier {
                let timeout = Duration::from_millis(ctx.config.external_timeout_ms);
                let outcome = run_external_stage(classifier.as_ref(), content, timeout).await;
                if outcome.applied {
                    stages_applied.push(Stage::ExternalModeration);
                }
                violations.extend(outcome.violations);
                warnings.extend(outcome.warnings);
            } else {
                tracing::debug!("External moderation enabled without a classifier, skipping");
            }
        }

        if ctx.config.enable_structural_filter {
            let rules = AgeRules::for_age_group(ctx.config.age_group);
            let outcome = evaluate_structural(content, content_type, rules);
            stages_applied.push(Stage::Structural);
            violations.extend(outcome.violations);
            warnings.extend(outcome.warnings);
        }

        if ctx.config.enable_term_list_filter {
            let outcome = evaluate_term_list(content, ctx.config.age_group, &ctx.terms.blocklist);
            stages_applied.push(Stage::TermList);
            violations.extend(outcome.violations);
            warnings.extend(outcome.warnings);
        }

        let scores = aggregate_scores(
            &violations,
            &warnings,
            &ctx.terms.allowlist,
            content,
            ctx.config.age_group,
            &ctx.config.weights,
        );
        let decision = decide(&scores, &violations, &ctx.config);

        if !decision.passed {
            tracing::debug!(reasons = ?decision.reasons, "Content rejected");
        }

        Ok(ContentSafetyResult::from_pipeline(
            decision.passed,
            scores,
            violations,
            warnings,
            CheckMetadata {
                checked_at: Utc::now(),
                processing_time_ms: start.elapsed().as_millis() as u64,
                stages_applied,
                content_type,
                age_group: ctx.config.age_group,
                safety_level: ctx.config.safety_level,
            },
        ))
    }

    /// Applies a partial configuration update as one atomic swap.
    ///
    /// Returns the new effective configuration.
    pub fn update_config(&self, update: ConfigUpdate) -> Result<SafetyConfig> {
        // Read-modify-write under one write acquisition so concurrent
        // administrative updates cannot overwrite each other.
        let mut guard = self.write_guard();
        let config = update.apply(&guard.config)?;
        tracing::info!(
            age_group = %config.age_group,
            safety_level = %config.safety_level,
            "Safety configuration updated"
        );
        let next = SafetyContext {
            config: config.clone(),
            terms: guard.terms.clone(),
        };
        *guard = Arc::new(next);
        Ok(config)
    }

    /// Appends blocklist entries. Pattern entries are validated first;
    /// on error nothing is added.
    pub fn add_blocklist_entries(&self, entries: Vec<BlocklistEntry>) -> Result<()> {
        let count = entries.len();
        let mut guard = self.write_guard();
        let terms = guard.terms.with_blocklist_entries(entries)?;
        tracing::info!(added = count, total = terms.blocklist.len(), "Blocklist extended");
        let next = SafetyContext {
            config: guard.config.clone(),
            terms,
        };
        *guard = Arc::new(next);
        Ok(())
    }

    /// Appends allowlist entries.
    pub fn add_allowlist_entries(&self, entries: Vec<AllowlistEntry>) {
        let count = entries.len();
        let mut guard = self.write_guard();
        let terms = guard.terms.with_allowlist_entries(entries);
        tracing::info!(added = count, total = terms.allowlist.len(), "Allowlist extended");
        let next = SafetyContext {
            config: guard.config.clone(),
            terms,
        };
        *guard = Arc::new(next);
    }

    /// Returns the current configuration.
    pub fn get_config(&self) -> SafetyConfig {
        self.snapshot().config.clone()
    }

    /// Returns a snapshot of the blocklist.
    pub fn get_blocklist(&self) -> Vec<BlocklistEntry> {
        self.snapshot().terms.blocklist.clone()
    }

    /// Returns a snapshot of the allowlist.
    pub fn get_allowlist(&self) -> Vec<AllowlistEntry> {
        self.snapshot().terms.allowlist.clone()
    }
}
