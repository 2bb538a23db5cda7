//! Feature extraction: turns raw document text into a `FeatureSet`.
//!
//! Algorithm:
//! 1. Normalize the raw text.
//! 2. Emails are pulled from the *raw* text, before normalization.
//! 3. Skills: every dictionary keyword is tested once for whole-word containment
//!    in the lowercased cleaned text; hits are kept verbatim, in dictionary order.
//! 4. Education: the same whole-word test against `EDUCATION_LEVELS`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::document::{AnalyzedDocument, FeatureSet, SkillSet};
use crate::nlp::keywords::{contains_whole_word, KeywordDictionary};
use crate::nlp::normalize::normalize;

/// Built-in education-level tokens (French and English degree names).
pub const EDUCATION_LEVELS: &[&str] = &[
    "bac",
    "baccalauréat",
    "licence",
    "bachelor",
    "master",
    "mastère",
    "ingénieur",
    "doctorat",
    "phd",
    "mba",
    "dut",
    "bts",
    "deug",
];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

pub fn is_education_level(token: &str) -> bool {
    EDUCATION_LEVELS.contains(&token)
}

/// Extracts deduplicated email addresses from raw text.
pub fn extract_emails(raw_text: &str) -> BTreeSet<String> {
    EMAIL_PATTERN
        .find_iter(raw_text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Finds dictionary keywords in already-lowercased text.
pub fn extract_skills(lower_text: &str, dictionary: &KeywordDictionary) -> SkillSet {
    let mut skills = SkillSet::default();

    for (category, keywords) in dictionary.iter() {
        let found = skills.get_mut(category);
        found.extend(
            keywords
                .iter()
                .filter(|keyword| contains_whole_word(lower_text, keyword))
                .cloned(),
        );
    }

    skills
}

/// Finds education-level tokens in already-lowercased text.
pub fn extract_education_levels(lower_text: &str) -> BTreeSet<String> {
    EDUCATION_LEVELS
        .iter()
        .filter(|level| contains_whole_word(lower_text, level))
        .map(|level| level.to_string())
        .collect()
}

/// Extracts skills, education levels and emails from raw document text.
/// Never fails; an empty dictionary simply yields empty skill categories.
pub fn extract_features(raw_text: &str, dictionary: &KeywordDictionary) -> FeatureSet {
    analyze_document(raw_text, dictionary).features
}

/// Like `extract_features`, but also returns the cleaned text needed as the
/// `full_text` half of a match bundle.
pub fn analyze_document(raw_text: &str, dictionary: &KeywordDictionary) -> AnalyzedDocument {
    let cleaned_text = normalize(raw_text);
    let lower = cleaned_text.to_lowercase();

    let features = FeatureSet {
        skills: extract_skills(&lower, dictionary),
        education: extract_education_levels(&lower),
        emails: extract_emails(raw_text),
    };

    debug!(
        "Analyzed document: {} chars cleaned, {} skills, {} education levels, {} emails",
        cleaned_text.len(),
        features.skills.flatten().len(),
        features.education.len(),
        features.emails.len()
    );

    AnalyzedDocument {
        cleaned_text,
        features,
    }
}

/// Analyzes a job posting. Identical to `analyze_document` except that contact
/// emails are not part of a posting's requirements and are left empty.
pub fn analyze_job_posting(raw_text: &str, dictionary: &KeywordDictionary) -> AnalyzedDocument {
    let mut analyzed = analyze_document(raw_text, dictionary);
    analyzed.features.emails.clear();
    analyzed
}
