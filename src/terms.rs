//! Blocklist and allowlist term collections.
//!
//! Entries are append-only for the process lifetime. The service holds
//! term lists inside an immutable snapshot; administrative adds build a
//! new list and swap the whole snapshot, so concurrent checks never
//! observe a partially-updated list.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SafetyError};
use crate::types::{AgeGroup, Severity};

/// Category of a blocklist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    /// Generally inappropriate for children.
    Inappropriate,
    /// Frightening content.
    Scary,
    /// Violent content.
    Violent,
    /// Adult content.
    Adult,
    /// Negative or unkind language.
    Negative,
}

impl BlockCategory {
    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            BlockCategory::Inappropriate => "Inappropriate",
            BlockCategory::Scary => "Scary",
            BlockCategory::Violent => "Violent",
            BlockCategory::Adult => "Adult",
            BlockCategory::Negative => "Negative",
        }
    }
}

/// Category of an allowlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowCategory {
    /// Educational vocabulary; boosts the educational score.
    Educational,
    /// Positive vocabulary; boosts age-appropriateness and safety.
    Positive,
    /// Creative vocabulary; treated like positive.
    Creative,
    /// Known-safe vocabulary; treated like positive.
    Safe,
}

impl AllowCategory {
    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            AllowCategory::Educational => "Educational",
            AllowCategory::Positive => "Positive",
            AllowCategory::Creative => "Creative",
            AllowCategory::Safe => "Safe",
        }
    }
}

/// A term that penalizes content when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocklistEntry {
    /// The literal term or regex pattern.
    pub term: String,
    /// What kind of problem this term indicates.
    pub category: BlockCategory,
    /// High severity produces a violation; low/medium produce a warning.
    pub severity: Severity,
    /// Age groups this entry applies to.
    pub age_groups: Vec<AgeGroup>,
    /// Whether `term` is a regex pattern rather than a literal.
    pub is_pattern: bool,
}

impl BlocklistEntry {
    /// Creates a literal (substring) blocklist entry.
    pub fn literal(
        term: impl Into<String>,
        category: BlockCategory,
        severity: Severity,
        age_groups: Vec<AgeGroup>,
    ) -> Self {
        Self {
            term: term.into(),
            category,
            severity,
            age_groups,
            is_pattern: false,
        }
    }

    /// Creates a regex-pattern blocklist entry.
    pub fn pattern(
        term: impl Into<String>,
        category: BlockCategory,
        severity: Severity,
        age_groups: Vec<AgeGroup>,
    ) -> Self {
        Self {
            term: term.into(),
            category,
            severity,
            age_groups,
            is_pattern: true,
        }
    }

    /// Returns true if this entry applies to the given age group.
    pub fn applies_to(&self, age_group: AgeGroup) -> bool {
        self.age_groups.contains(&age_group)
    }

    /// Validates the entry. Pattern entries must compile; this is
    /// enforced at add time so the filter stage itself cannot fail.
    pub fn validate(&self) -> Result<()> {
        if self.is_pattern {
            RegexBuilder::new(&self.term)
                .case_insensitive(true)
                .build()
                .map_err(|source| SafetyError::InvalidPattern {
                    term: self.term.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Presence test against the content, case-insensitive.
    ///
    /// Multiple occurrences of the same term are not counted separately.
    pub fn matches(&self, content: &str) -> bool {
        if self.is_pattern {
            match RegexBuilder::new(&self.term).case_insensitive(true).build() {
                Ok(re) => re.is_match(content),
                // Unreachable after validate(), but never panic in a filter.
                Err(_) => false,
            }
        } else {
            content.to_lowercase().contains(&self.term.to_lowercase())
        }
    }
}

/// A term that rewards content when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowlistEntry {
    /// The literal term, matched as a case-insensitive substring.
    pub term: String,
    /// What kind of positive signal this term carries.
    pub category: AllowCategory,
    /// Age groups this entry applies to.
    pub age_groups: Vec<AgeGroup>,
    /// Score boost applied when the term is present.
    pub boost: f64,
}

impl AllowlistEntry {
    /// Creates a new allowlist entry.
    pub fn new(
        term: impl Into<String>,
        category: AllowCategory,
        age_groups: Vec<AgeGroup>,
        boost: f64,
    ) -> Self {
        Self {
            term: term.into(),
            category,
            age_groups,
            boost,
        }
    }

    /// Returns true if this entry applies to the given age group.
    pub fn applies_to(&self, age_group: AgeGroup) -> bool {
        self.age_groups.contains(&age_group)
    }

    /// Presence test against the content, case-insensitive.
    pub fn matches(&self, content: &str) -> bool {
        content.to_lowercase().contains(&self.term.to_lowercase())
    }
}

/// Immutable snapshot of both term lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermLists {
    /// Terms that penalize content.
    pub blocklist: Vec<BlocklistEntry>,
    /// Terms that reward content.
    pub allowlist: Vec<AllowlistEntry>,
}

fn all_ages() -> Vec<AgeGroup> {
    AgeGroup::all().to_vec()
}

fn younger_ages() -> Vec<AgeGroup> {
    vec![AgeGroup::Toddler, AgeGroup::Preschool]
}

impl TermLists {
    /// Creates empty term lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the starter child-safety term lists the service ships with.
    pub fn starter_defaults() -> Self {
        Self {
            blocklist: vec![
                BlocklistEntry::literal("gun", BlockCategory::Violent, Severity::High, all_ages()),
                BlocklistEntry::literal("kill", BlockCategory::Violent, Severity::High, all_ages()),
                BlocklistEntry::literal(
                    "blood",
                    BlockCategory::Scary,
                    Severity::Medium,
                    younger_ages(),
                ),
                BlocklistEntry::literal(
                    "ghost",
                    BlockCategory::Scary,
                    Severity::Low,
                    vec![AgeGroup::Toddler],
                ),
                BlocklistEntry::literal(
                    "hate",
                    BlockCategory::Negative,
                    Severity::Medium,
                    all_ages(),
                ),
                BlocklistEntry::literal(
                    "stupid",
                    BlockCategory::Negative,
                    Severity::Low,
                    all_ages(),
                ),
                BlocklistEntry::literal("dumb", BlockCategory::Negative, Severity::Low, all_ages()),
                BlocklistEntry::pattern(
                    r"\bdie(s|d)?\b",
                    BlockCategory::Scary,
                    Severity::Medium,
                    younger_ages(),
                ),
            ],
            allowlist: vec![
                AllowlistEntry::new("share", AllowCategory::Educational, all_ages(), 5.0),
                AllowlistEntry::new("learn", AllowCategory::Educational, all_ages(), 5.0),
                AllowlistEntry::new(
                    "count",
                    AllowCategory::Educational,
                    younger_ages(),
                    4.0,
                ),
                AllowlistEntry::new("kind", AllowCategory::Positive, all_ages(), 6.0),
                AllowlistEntry::new("friend", AllowCategory::Positive, all_ages(), 5.0),
                AllowlistEntry::new("help", AllowCategory::Positive, all_ages(), 5.0),
                AllowlistEntry::new(
                    "brave",
                    AllowCategory::Positive,
                    vec![AgeGroup::Preschool, AgeGroup::Elementary],
                    4.0,
                ),
                AllowlistEntry::new(
                    "imagin",
                    AllowCategory::Creative,
                    vec![AgeGroup::Elementary],
                    4.0,
                ),
            ],
        }
    }

    /// Appends validated blocklist entries, consuming and returning a new
    /// snapshot. Fails without partial effect if any entry is invalid.
    pub fn with_blocklist_entries(&self, entries: Vec<BlocklistEntry>) -> Result<Self> {
        for entry in &entries {
            entry.validate()?;
        }
        let mut next = self.clone();
        next.blocklist.extend(entries);
        Ok(next)
    }

    /// Appends allowlist entries, returning a new snapshot.
    pub fn with_allowlist_entries(&self, entries: Vec<AllowlistEntry>) -> Self {
        let mut next = self.clone();
        next.allowlist.extend(entries);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_entry_matches_case_insensitive() {
        let entry =
            BlocklistEntry::literal("gun", BlockCategory::Violent, Severity::High, all_ages());
        assert!(entry.matches("He found a GUN in the drawer"));
        assert!(!entry.matches("He found a toy in the drawer"));
    }

    #[test]
    fn pattern_entry_uses_word_boundaries() {
        let entry = BlocklistEntry::pattern(
            r"\bdie(s|d)?\b",
            BlockCategory::Scary,
            Severity::Medium,
            younger_ages(),
        );
        assert!(entry.matches("the plant died"));
        assert!(entry.matches("Do not DIE"));
        // "die" embedded in another word is not a match
        assert!(!entry.matches("a fine soldier"));
        assert!(!entry.matches("they ate their diet snacks"));
    }

    #[test]
    fn invalid_pattern_fails_validation() {
        let entry = BlocklistEntry::pattern(
            "(unclosed",
            BlockCategory::Violent,
            Severity::High,
            all_ages(),
        );
        assert!(matches!(
            entry.validate(),
            Err(SafetyError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn literal_entry_always_validates() {
        let entry = BlocklistEntry::literal(
            "(unclosed",
            BlockCategory::Violent,
            Severity::High,
            all_ages(),
        );
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn entry_age_group_applicability() {
        let entry = BlocklistEntry::literal(
            "ghost",
            BlockCategory::Scary,
            Severity::Low,
            vec![AgeGroup::Toddler],
        );
        assert!(entry.applies_to(AgeGroup::Toddler));
        assert!(!entry.applies_to(AgeGroup::Elementary));
    }

    #[test]
    fn allowlist_entry_matches_inflections() {
        let entry = AllowlistEntry::new("help", AllowCategory::Positive, all_ages(), 5.0);
        assert!(entry.matches("The dragon helped the kitten"));
    }

    #[test]
    fn starter_defaults_validate() {
        let lists = TermLists::starter_defaults();
        assert!(!lists.blocklist.is_empty());
        assert!(!lists.allowlist.is_empty());
        for entry in &lists.blocklist {
            assert!(entry.validate().is_ok(), "bad default entry: {}", entry.term);
        }
    }

    #[test]
    fn with_blocklist_entries_is_append_only() {
        let lists = TermLists::starter_defaults();
        let before = lists.blocklist.len();
        let next = lists
            .with_blocklist_entries(vec![BlocklistEntry::literal(
                "sword",
                BlockCategory::Violent,
                Severity::High,
                all_ages(),
            )])
            .unwrap();
        assert_eq!(next.blocklist.len(), before + 1);
        // Original snapshot untouched
        assert_eq!(lists.blocklist.len(), before);
    }

    #[test]
    fn with_blocklist_entries_rejects_bad_pattern_without_partial_effect() {
        let lists = TermLists::new();
        let result = lists.with_blocklist_entries(vec![
            BlocklistEntry::literal("ok", BlockCategory::Negative, Severity::Low, all_ages()),
            BlocklistEntry::pattern("(bad", BlockCategory::Negative, Severity::Low, all_ages()),
        ]);
        assert!(result.is_err());
        assert!(lists.blocklist.is_empty());
    }

    #[test]
    fn term_lists_serialization_roundtrip() {
        let lists = TermLists::starter_defaults();
        let json = serde_json::to_string(&lists).unwrap();
        let back: TermLists = serde_json::from_str(&json).unwrap();
        assert_eq!(lists.blocklist.len(), back.blocklist.len());
        assert_eq!(lists.allowlist.len(), back.allowlist.len());
    }
}
