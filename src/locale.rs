use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// @module: Locale-aware string comparison

/// Status value that marks a series as currently airing
pub const DEFAULT_AIRING_STATUS: &str = "снимается";

/// How much of a difference between two strings is significant
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollationStrength {
    /// Base letters only
    Primary,
    /// Base letters and accents
    Secondary,
    /// Base letters, accents and case
    #[default]
    Tertiary,
}

/// String equality under some collation rules
pub trait Collator {
    fn equals(&self, a: &str, b: &str) -> bool;
}

/// Collation context for status comparison.
///
/// Built once from configuration and handed to the extractor, so the
/// airing check can be exercised with other reference strings or strengths.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocaleConfig {
    /// Reference status meaning "currently airing"
    #[serde(default = "default_airing_status")]
    pub airing_status: String,

    /// Comparison strength
    #[serde(default)]
    pub strength: CollationStrength,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            airing_status: default_airing_status(),
            strength: CollationStrength::default(),
        }
    }
}

impl LocaleConfig {
    // @returns: Collator for the configured strength
    pub fn collator(&self) -> LocaleCollator {
        LocaleCollator::new(self.strength)
    }

    /// True when `status` collates equal to the airing reference
    pub fn is_airing(&self, status: Option<&str>) -> bool {
        match status {
            Some(status) => self.collator().equals(&self.airing_status, status),
            None => false,
        }
    }
}

fn default_airing_status() -> String {
    DEFAULT_AIRING_STATUS.to_string()
}

/// Collator working on canonical decompositions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleCollator {
    strength: CollationStrength,
}

impl LocaleCollator {
    pub fn new(strength: CollationStrength) -> Self {
        Self { strength }
    }

    // @returns: Comparison key for a string at this strength
    fn sort_key(&self, s: &str) -> String {
        let decomposed = s.nfd().filter(|c| !is_ignorable(*c));
        match self.strength {
            CollationStrength::Tertiary => decomposed.collect(),
            CollationStrength::Secondary => decomposed.flat_map(char::to_lowercase).collect(),
            CollationStrength::Primary => decomposed
                .filter(|c| !is_combining_mark(*c))
                .flat_map(char::to_lowercase)
                .collect(),
        }
    }
}

impl Collator for LocaleCollator {
    fn equals(&self, a: &str, b: &str) -> bool {
        self.sort_key(a) == self.sort_key(b)
    }
}

// Default-ignorable format characters
fn is_ignorable(c: char) -> bool {
    matches!(c, '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}
