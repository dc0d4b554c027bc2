//! External moderation adapter.
//!
//! Wraps a hosted text-classification signal behind a small capability
//! trait so the service can run with a real client, a test double, or no
//! classifier at all. The adapter is the only stage that touches the
//! network; it is bounded by a deadline and degrades to a skipped stage
//! on any failure.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SafetyError};
use crate::finding::{StageOutcome, Violation, ViolationKind};
use crate::types::Severity;

/// Default hosted moderation endpoint.
pub const DEFAULT_MODERATION_BASE_URL: &str = "https://api.openai.com/v1";

/// Default moderation model.
pub const DEFAULT_MODERATION_MODEL: &str = "omni-moderation-latest";

/// Fixed category taxonomy of the external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationCategory {
    /// Sexual content.
    Sexual,
    /// Violent content.
    Violence,
    /// Self-harm content.
    SelfHarm,
    /// Hate speech.
    Hate,
    /// Harassment.
    Harassment,
    /// Anything outside the named taxonomy.
    Other,
}

impl ModerationCategory {
    /// Maps a classifier category name (possibly with a subcategory
    /// suffix like `violence/graphic`) onto the fixed taxonomy.
    pub fn from_api_name(name: &str) -> Self {
        match name.split('/').next().unwrap_or(name) {
            "sexual" => ModerationCategory::Sexual,
            "violence" => ModerationCategory::Violence,
            "self-harm" | "self_harm" => ModerationCategory::SelfHarm,
            "hate" => ModerationCategory::Hate,
            "harassment" => ModerationCategory::Harassment,
            _ => ModerationCategory::Other,
        }
    }

    /// Returns the wire name used for this category.
    pub fn name(&self) -> &'static str {
        match self {
            ModerationCategory::Sexual => "sexual",
            ModerationCategory::Violence => "violence",
            ModerationCategory::SelfHarm => "self_harm",
            ModerationCategory::Hate => "hate",
            ModerationCategory::Harassment => "harassment",
            ModerationCategory::Other => "other",
        }
    }

    /// Fixed severity map for flagged categories.
    pub fn severity(&self) -> Severity {
        match self {
            ModerationCategory::Sexual
            | ModerationCategory::Violence
            | ModerationCategory::SelfHarm => Severity::Critical,
            ModerationCategory::Hate | ModerationCategory::Harassment => Severity::High,
            ModerationCategory::Other => Severity::Medium,
        }
    }
}

/// One `(category, flagged)` pair from the external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryFlag {
    /// The classifier category.
    pub category: ModerationCategory,
    /// Whether the classifier flagged the content for this category.
    pub flagged: bool,
}

/// Capability trait for the external text classifier.
///
/// Implementations must be idempotent and side-effect-free from the
/// engine's perspective.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classifies the given text, returning flagged-category pairs.
    async fn classify(&self, text: &str) -> Result<Vec<CategoryFlag>>;

    /// Returns the name of this classifier for logging.
    fn name(&self) -> &'static str {
        "classifier"
    }
}

#[derive(Debug, Deserialize)]
struct ModerationApiResponse {
    results: Vec<ModerationApiResult>,
}

#[derive(Debug, Deserialize)]
struct ModerationApiResult {
    #[allow(dead_code)]
    flagged: bool,
    categories: HashMap<String, bool>,
}

/// `reqwest` client for an OpenAI-compatible `/moderations` endpoint.
pub struct ModerationClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ModerationClient {
    /// Creates a client against the default hosted endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_MODERATION_BASE_URL.to_string(),
            model: DEFAULT_MODERATION_MODEL.to_string(),
        }
    }

    /// Overrides the endpoint base URL (self-hosted or test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the moderation model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn parse_response(response: ModerationApiResponse) -> Result<Vec<CategoryFlag>> {
        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SafetyError::InvalidResponse("empty results array".to_string()))?;

        // Collapse subcategories ("violence/graphic") onto the fixed
        // taxonomy; a category is flagged if any of its keys is.
        let mut flags: HashMap<ModerationCategory, bool> = HashMap::new();
        for (name, flagged) in result.categories {
            let category = ModerationCategory::from_api_name(&name);
            *flags.entry(category).or_insert(false) |= flagged;
        }

        Ok(flags
            .into_iter()
            .map(|(category, flagged)| CategoryFlag { category, flagged })
            .collect())
    }
}

#[async_trait]
impl TextClassifier for ModerationClient {
    async fn classify(&self, text: &str) -> Result<Vec<CategoryFlag>> {
        let url = format!("{}/moderations", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({ "model": self.model, "input": text });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ModerationApiResponse>()
            .await?;

        Self::parse_response(response)
    }

    fn name(&self) -> &'static str {
        "moderation_api"
    }
}

/// Runs the external moderation stage with a bounded deadline.
///
/// Any failure (transport, bad payload, deadline) is a soft failure: the
/// stage is reported as skipped and contributes nothing to the check.
pub async fn run_external_stage(
    classifier: &dyn TextClassifier,
    content: &str,
    timeout: Duration,
) -> StageOutcome {
    let flags = match tokio::time::timeout(timeout, classifier.classify(content)).await {
        Ok(Ok(flags)) => flags,
        Ok(Err(err)) => {
            tracing::warn!(classifier = classifier.name(), error = %err, "Moderation stage failed, skipping");
            return StageOutcome::skipped();
        }
        Err(_) => {
            let err = SafetyError::Timeout(timeout.as_millis() as u64);
            tracing::warn!(classifier = classifier.name(), error = %err, "Moderation stage timed out, skipping");
            return StageOutcome::skipped();
        }
    };

    let violations: Vec<Violation> = flags
        .iter()
        .filter(|flag| flag.flagged)
        .map(|flag| {
            Violation::new(
                ViolationKind::ExternalSignal,
                flag.category.severity(),
                flag.category.name(),
                format!(
                    "Content flagged by moderation classifier for {}",
                    flag.category.name()
                ),
            )
        })
        .collect();

    StageOutcome::with_findings(violations, Vec::new())
}
