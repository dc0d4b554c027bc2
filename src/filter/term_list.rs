//! Blocklist term matching.

use crate::finding::{StageOutcome, Violation, ViolationKind, Warning, WarningKind};
use crate::terms::BlocklistEntry;
use crate::types::{AgeGroup, Severity};

/// Evaluates content against the blocklist entries applicable to the
/// given age group.
///
/// High-severity matches become `term_list` violations; low/medium
/// matches become vocabulary warnings carrying the same description and
/// suggestion. Each entry is a presence test only.
pub fn evaluate_term_list(
    content: &str,
    age_group: AgeGroup,
    blocklist: &[BlocklistEntry],
) -> StageOutcome {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    for entry in blocklist {
        if !entry.applies_to(age_group) || !entry.matches(content) {
            continue;
        }

        let description = format!(
            "Content contains blocked term in category '{}'",
            entry.category.name()
        );
        let suggestion = format!("Replace or remove '{}' for this age group", entry.term);

        if entry.severity >= Severity::High {
            violations.push(
                Violation::new(
                    ViolationKind::TermList,
                    entry.severity,
                    entry.category.name(),
                    description,
                )
                .with_flagged_text(entry.term.clone())
                .with_suggestion(suggestion),
            );
        } else {
            warnings.push(Warning::new(WarningKind::Vocabulary, description).with_suggestion(suggestion));
        }
    }

    StageOutcome::with_findings(violations, warnings)
}
