//! Keyword dictionary: the static, categorized skill vocabulary used by extraction.
//!
//! Loaded once at startup and injected wherever extraction or contract checks
//! need it. Read-only after construction, so it can be shared across threads
//! behind an `Arc` without locking.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Fixed skill categories. A FeatureSet can only ever carry these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frameworks,
    Tools,
    SoftSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Languages,
        SkillCategory::Frameworks,
        SkillCategory::Tools,
        SkillCategory::SoftSkills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Languages => "languages",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Tools => "tools",
            SkillCategory::SoftSkills => "soft_skills",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup-time failure to build the dictionary. Fatal to the extractor.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read keyword dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse keyword dictionary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("keyword dictionary category '{0}' contains an empty keyword")]
    EmptyKeyword(SkillCategory),
}

/// Categorized keyword vocabulary.
///
/// Each category holds an ordered set of lowercase tokens: source order is kept,
/// later duplicates are dropped. Categories iterate in `SkillCategory` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordDictionary {
    categories: BTreeMap<SkillCategory, Vec<String>>,
}

impl KeywordDictionary {
    /// Builds a dictionary from an already structured table.
    pub fn from_entries(
        entries: BTreeMap<SkillCategory, Vec<String>>,
    ) -> Result<Self, DictionaryError> {
        let mut categories = BTreeMap::new();

        for (category, raw_keywords) in entries {
            let mut seen = BTreeSet::new();
            let mut keywords = Vec::with_capacity(raw_keywords.len());

            for raw in raw_keywords {
                let keyword = raw.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(DictionaryError::EmptyKeyword(category));
                }
                if seen.insert(keyword.clone()) {
                    keywords.push(keyword);
                }
            }

            categories.insert(category, keywords);
        }

        Ok(Self { categories })
    }

    /// Parses a JSON object of `{ "<category>": ["keyword", ...] }`.
    /// Unknown category names are rejected.
    pub fn from_json_str(source: &str) -> Result<Self, DictionaryError> {
        let entries: BTreeMap<SkillCategory, Vec<String>> = serde_json::from_str(source)?;
        Self::from_entries(entries)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DictionaryError> {
        let entries: BTreeMap<SkillCategory, Vec<String>> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    /// Categories present in the dictionary, in iteration order.
    pub fn categories(&self) -> impl Iterator<Item = SkillCategory> + '_ {
        self.categories.keys().copied()
    }

    pub fn contains_category(&self, category: SkillCategory) -> bool {
        self.categories.contains_key(&category)
    }

    /// Iterates `(category, keywords)` in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &[String])> + '_ {
        self.categories
            .iter()
            .map(|(category, keywords)| (*category, keywords.as_slice()))
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.keyword_count() == 0
    }
}

/// Loads the keyword dictionary from a JSON file on disk.
pub fn load_keyword_dictionary(path: impl AsRef<Path>) -> Result<KeywordDictionary, DictionaryError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dictionary = KeywordDictionary::from_reader(std::io::BufReader::new(file))?;
    info!(
        "Loaded keyword dictionary from {} ({} categories, {} keywords)",
        path.display(),
        dictionary.categories.len(),
        dictionary.keyword_count()
    );
    Ok(dictionary)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-word containment: `needle` occurs in `haystack` with a non-word
/// character or a string edge immediately on both sides.
///
/// Keeps "java" from matching inside "javascript" while still letting
/// keywords with punctuation (".net", "node.js") match on their own.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(needle) {
        let begin = start + offset;
        let end = begin + needle.len();

        let left_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let right_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));

        if left_ok && right_ok {
            return true;
        }

        // Advance by one character so overlapping occurrences are still tried.
        let step = haystack[begin..].chars().next().map_or(1, char::len_utf8);
        start = begin + step;
    }

    false
}
