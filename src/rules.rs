//! Static per-age-band rule tables.
//!
//! Each band is fully specified on its own; the engine never derives one
//! band's rules from another, so there are no silent gaps between bands.

use crate::types::AgeGroup;

/// Structural and thematic limits for one age band.
#[derive(Debug, Clone, Copy)]
pub struct AgeRules {
    /// Themes that must not appear in content for this band.
    pub forbidden_themes: &'static [&'static str],
    /// Themes of which at least one should appear in story content.
    ///
    /// These are stem-like tokens ("help", "friend") matched as
    /// case-insensitive substrings, so inflections count.
    pub required_themes: &'static [&'static str],
    /// Maximum words per sentence for story content.
    pub max_sentence_length_words: usize,
    /// Maximum total words for story content.
    pub max_content_length_words: usize,
    /// Vocabulary complexity hint for this band.
    pub vocabulary_hint: &'static str,
}

const TODDLER_RULES: AgeRules = AgeRules {
    forbidden_themes: &[
        "violence", "scary", "scared", "monster", "death", "fight", "angry", "dark",
    ],
    required_themes: &["friend", "share", "kind", "family", "animal", "color", "help"],
    max_sentence_length_words: 8,
    max_content_length_words: 300,
    vocabulary_hint: "very simple words, lots of repetition",
};

const PRESCHOOL_RULES: AgeRules = AgeRules {
    forbidden_themes: &["violence", "death", "weapon", "scary", "blood"],
    required_themes: &["friend", "learn", "help", "kind", "adventure", "family"],
    max_sentence_length_words: 12,
    max_content_length_words: 800,
    vocabulary_hint: "simple words, short sentences",
};

const ELEMENTARY_RULES: AgeRules = AgeRules {
    forbidden_themes: &[
        "graphic violence",
        "adult content",
        "drug",
        "weapon",
        "gore",
    ],
    required_themes: &["problem solving", "teamwork", "courage", "learn", "friend"],
    max_sentence_length_words: 20,
    max_content_length_words: 2000,
    vocabulary_hint: "grade-school vocabulary, varied sentences",
};

impl AgeRules {
    /// Returns the rule table for the given age group.
    pub fn for_age_group(age_group: AgeGroup) -> &'static AgeRules {
        match age_group {
            AgeGroup::Toddler => &TODDLER_RULES,
            AgeGroup::Preschool => &PRESCHOOL_RULES,
            AgeGroup::Elementary => &ELEMENTARY_RULES,
        }
    }
}
