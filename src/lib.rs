//! Storyguard - Age-aware content safety engine for AI-generated
//! children's stories.
//!
//! The engine fuses three independent signals (an external moderation
//! classifier, rule-table structural checks, and curated term lists)
//! into calibrated safety, age-appropriateness, and educational scores,
//! then applies per-level thresholds to accept or reject content. It
//! fails closed: any internal error rejects the content rather than
//! letting it through.
//!
//! ```no_run
//! use storyguard::{AgeGroup, ContentType, SafetyLevel, SafetyService};
//!
//! # async fn demo() {
//! let service = SafetyService::new(AgeGroup::Preschool, SafetyLevel::Moderate, None);
//! let result = service
//!     .check_content_safety("The kind dragon helped a friend.", ContentType::Story)
//!     .await;
//! assert!(result.passed);
//! # }
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod filter;
pub mod finding;
pub mod moderation;
pub mod result;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod terms;
pub mod types;

pub use config::{ConfigUpdate, SafetyConfig, ScoringWeights};
pub use decision::Decision;
pub use error::{Result, SafetyError};
pub use finding::{Stage, StageOutcome, Violation, ViolationKind, Warning, WarningKind};
pub use moderation::{CategoryFlag, ModerationCategory, ModerationClient, TextClassifier};
pub use result::{CheckMetadata, ContentSafetyResult};
pub use rules::AgeRules;
pub use scoring::ScoreCard;
pub use service::SafetyService;
pub use terms::{AllowCategory, AllowlistEntry, BlockCategory, BlocklistEntry, TermLists};
pub use types::{AgeGroup, ContentType, SafetyLevel, Severity};
