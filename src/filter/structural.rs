//! Structural and theme checks against the age-band rule table.

use crate::finding::{StageOutcome, Violation, ViolationKind, Warning, WarningKind};
use crate::rules::AgeRules;
use crate::types::{ContentType, Severity};

/// Evaluates content against the rule table for one age band.
///
/// Forbidden-theme scanning applies to every content type; sentence
/// length, content length, and required-theme checks apply to stories
/// only. Pure and deterministic; no external calls.
pub fn evaluate_structural(
    content: &str,
    content_type: ContentType,
    rules: &AgeRules,
) -> StageOutcome {
    let content_lower = content.to_lowercase();
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    for theme in rules.forbidden_themes {
        if content_lower.contains(theme) {
            violations.push(
                Violation::new(
                    ViolationKind::AgeInappropriate,
                    Severity::High,
                    "forbidden_theme",
                    format!("Theme '{theme}' is not appropriate for this age group"),
                )
                .with_flagged_text(*theme)
                .with_suggestion(format!(
                    "Consider themes like: {}",
                    rules.required_themes.join(", ")
                )),
            );
        }
    }

    if content_type == ContentType::Story {
        check_sentence_length(&content_lower, rules, &mut warnings);
        check_content_length(&content_lower, rules, &mut warnings);
        check_required_themes(&content_lower, rules, &mut warnings);
    }

    StageOutcome::with_findings(violations, warnings)
}

fn check_sentence_length(content_lower: &str, rules: &AgeRules, warnings: &mut Vec<Warning>) {
    let long_sentences = content_lower
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| s.split_whitespace().count() > rules.max_sentence_length_words)
        .count();

    // One aggregated warning carrying the count, not one per sentence.
    if long_sentences > 0 {
        warnings.push(
            Warning::new(
                WarningKind::Complexity,
                format!(
                    "{long_sentences} sentence(s) exceed {} words",
                    rules.max_sentence_length_words
                ),
            )
            .with_suggestion("Break long sentences into shorter ones"),
        );
    }
}

fn check_content_length(content_lower: &str, rules: &AgeRules, warnings: &mut Vec<Warning>) {
    let word_count = content_lower.split_whitespace().count();
    if word_count > rules.max_content_length_words {
        warnings.push(
            Warning::new(
                WarningKind::Complexity,
                format!(
                    "Content is {word_count} words, above the {}-word limit for this age group",
                    rules.max_content_length_words
                ),
            )
            .with_suggestion("Shorten the story to hold attention"),
        );
    }
}

fn check_required_themes(content_lower: &str, rules: &AgeRules, warnings: &mut Vec<Warning>) {
    let has_required = rules
        .required_themes
        .iter()
        .any(|theme| content_lower.contains(theme));

    if !has_required {
        warnings.push(
            Warning::new(
                WarningKind::Educational,
                "No age-appropriate themes found in the story",
            )
            .with_suggestion(format!(
                "Consider weaving in themes like: {}",
                rules.required_themes.join(", ")
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgeGroup;

    fn rules(age: AgeGroup) -> &'static AgeRules {
        AgeRules::for_age_group(age)
    }

    #[test]
    fn clean_story_has_no_findings() {
        let outcome = evaluate_structural(
            "The kind dragon helped the little kitten.",
            ContentType::Story,
            rules(AgeGroup::Preschool),
        );
        assert!(outcome.applied);
        assert!(outcome.violations.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn forbidden_theme_is_high_violation_with_suggestion() {
        let outcome = evaluate_structural(
            "The story was full of violence.",
            ContentType::Story,
            rules(AgeGroup::Toddler),
        );
        assert_eq!(outcome.violations.len(), 1);
        let v = &outcome.violations[0];
        assert_eq!(v.kind, ViolationKind::AgeInappropriate);
        assert_eq!(v.severity, Severity::High);
        assert_eq!(v.flagged_text.as_deref(), Some("violence"));
        assert!(v.suggestion.as_deref().unwrap().contains("friend"));
    }

    #[test]
    fn forbidden_theme_scan_is_case_insensitive() {
        let outcome = evaluate_structural(
            "VIOLENCE everywhere",
            ContentType::Prompt,
            rules(AgeGroup::Toddler),
        );
        assert_eq!(outcome.violations.len(), 1);
    }

    #[test]
    fn multiple_forbidden_themes_each_get_a_violation() {
        let outcome = evaluate_structural(
            "The violence left everyone scared and angry.",
            ContentType::Story,
            rules(AgeGroup::Toddler),
        );
        let themes: Vec<_> = outcome
            .violations
            .iter()
            .filter_map(|v| v.flagged_text.as_deref())
            .collect();
        assert!(themes.contains(&"violence"));
        assert!(themes.contains(&"scared"));
        assert!(themes.contains(&"angry"));
    }

    #[test]
    fn scary_does_not_match_scared() {
        // "scary" is the preschool forbidden token; it must not trip on
        // the unrelated word "scared".
        let outcome = evaluate_structural(
            "The kitten was scared but her friend helped.",
            ContentType::Story,
            rules(AgeGroup::Preschool),
        );
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn long_sentences_produce_one_aggregated_warning() {
        // Two sentences over the toddler limit of 8 words.
        let content = "one two three four five six seven eight nine ten. \
                       short one. \
                       one two three four five six seven eight nine again here.";
        let outcome = evaluate_structural(content, ContentType::Story, rules(AgeGroup::Toddler));
        let complexity: Vec<_> = outcome
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::Complexity)
            .collect();
        assert_eq!(complexity.len(), 1);
        assert!(complexity[0].message.contains("2 sentence(s)"));
    }

    #[test]
    fn over_length_content_produces_complexity_warning() {
        let long_story = "my friend and i share. ".repeat(70); // 350 words
        let outcome = evaluate_structural(&long_story, ContentType::Story, rules(AgeGroup::Toddler));
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::Complexity && w.message.contains("350 words")));
        // Required theme "friend" is present, so no educational warning.
        assert!(!outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::Educational));
    }

    #[test]
    fn missing_required_themes_produces_educational_warning() {
        let outcome = evaluate_structural(
            "The rock sat on the hill.",
            ContentType::Story,
            rules(AgeGroup::Preschool),
        );
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::Educational));
    }

    #[test]
    fn required_theme_matches_inflected_forms() {
        // "help" should match "helped".
        let outcome = evaluate_structural(
            "The dragon helped everyone in town.",
            ContentType::Story,
            rules(AgeGroup::Preschool),
        );
        assert!(!outcome
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::Educational));
    }

    #[test]
    fn structural_story_checks_skip_non_story_content() {
        let long_prompt = "word ".repeat(400);
        let outcome =
            evaluate_structural(&long_prompt, ContentType::Prompt, rules(AgeGroup::Toddler));
        assert!(outcome.warnings.is_empty());

        let outcome =
            evaluate_structural(&long_prompt, ContentType::Outline, rules(AgeGroup::Toddler));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn deterministic_for_same_input() {
        let content = "A scary monster made everyone fight in the dark.";
        let a = evaluate_structural(content, ContentType::Story, rules(AgeGroup::Toddler));
        let b = evaluate_structural(content, ContentType::Story, rules(AgeGroup::Toddler));
        assert_eq!(a.violations, b.violations);
        assert_eq!(a.warnings, b.warnings);
    }
}
