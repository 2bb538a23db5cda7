//! Match scoring: combines skill overlap, text similarity and education into
//! one weighted compatibility score for a (candidate, job) pair.
//!
//! total = 0.5 * skills + 0.3 * text_similarity + 0.2 * education
//!
//! Each component is computed in [0, 1] and reported as a percentage rounded to
//! two decimals, half away from zero.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::document::{DocumentBundle, FeatureSet, SkillSet};
use crate::nlp::extraction::is_education_level;
use crate::nlp::keywords::{KeywordDictionary, SkillCategory};
use crate::nlp::similarity::text_similarity;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchWeights {
    pub skills: f64,
    pub text_similarity: f64,
    pub education: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            text_similarity: 0.3,
            education: 0.2,
        }
    }
}

/// Skill overlap between a candidate and a job, before weighting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillOverlap {
    pub score: f64, // 0.0 – 1.0
    pub matching: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Explainable result of scoring one (candidate, job) pair. All scores are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub total_score: f64,
    pub skill_score: f64,
    pub text_similarity: f64,
    pub education_score: f64,
    pub matching_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSide {
    Candidate,
    Job,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSide::Candidate => f.write_str("candidate"),
            DocumentSide::Job => f.write_str("job"),
        }
    }
}

/// A structurally invalid FeatureSet was passed in. This is a caller bug and is
/// never corrected silently.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("contract violation in {side} features: {reason}")]
    ContractViolation { side: DocumentSide, reason: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scores
// ────────────────────────────────────────────────────────────────────────────

/// Fraction of the job's flattened skill set the candidate covers.
///
/// An empty job skill set yields 0 with no matching/missing skills: an
/// unspecified requirement earns no skill credit. Extra candidate skills are ignored.
pub fn compute_skill_overlap(candidate: &SkillSet, job: &SkillSet) -> SkillOverlap {
    let job_set = job.flatten();
    if job_set.is_empty() {
        return SkillOverlap::default();
    }

    let candidate_set = candidate.flatten();
    let matching: BTreeSet<String> = job_set
        .intersection(&candidate_set)
        .map(|s| s.to_string())
        .collect();
    let missing: BTreeSet<String> = job_set
        .difference(&candidate_set)
        .map(|s| s.to_string())
        .collect();

    SkillOverlap {
        score: matching.len() as f64 / job_set.len() as f64,
        matching,
        missing,
    }
}

/// Binary education gate. No job requirement means full credit; otherwise any
/// shared education token passes. Degree levels are not ordered.
pub fn compute_education_score(candidate: &BTreeSet<String>, job: &BTreeSet<String>) -> f64 {
    if job.is_empty() {
        return 1.0;
    }
    if candidate.intersection(job).next().is_some() {
        1.0
    } else {
        0.0
    }
}

/// Weighted total of the three components, each in [0, 1].
pub fn compute_combined_score(
    skills: f64,
    text_similarity: f64,
    education: f64,
    weights: &MatchWeights,
) -> f64 {
    (weights.skills * skills
        + weights.text_similarity * text_similarity
        + weights.education * education)
        .clamp(0.0, 1.0)
}

/// Rounds to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_percent(fraction: f64) -> f64 {
    round2(fraction.clamp(0.0, 1.0) * 100.0)
}

fn assemble(
    skills: SkillOverlap,
    similarity: f64,
    education: f64,
    weights: &MatchWeights,
) -> MatchResult {
    let total = compute_combined_score(skills.score, similarity, education, weights);

    MatchResult {
        total_score: to_percent(total),
        skill_score: to_percent(skills.score),
        text_similarity: to_percent(similarity),
        education_score: to_percent(education),
        matching_skills: skills.matching,
        missing_skills: skills.missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

/// Scores (candidate, job) pairs. Holds the dictionary's category set so
/// incoming FeatureSets can be checked against it. Stateless across calls.
#[derive(Debug, Clone)]
pub struct Matcher {
    categories: HashSet<SkillCategory>,
    weights: MatchWeights,
}

impl Matcher {
    pub fn new(dictionary: &KeywordDictionary) -> Self {
        Self {
            categories: dictionary.categories().collect(),
            weights: MatchWeights::default(),
        }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Checks a FeatureSet's structure:
    /// - non-empty skill categories must exist in the dictionary
    /// - skill tokens must be non-empty and lowercase
    /// - education tokens must be known education levels
    pub fn validate(&self, side: DocumentSide, features: &FeatureSet) -> Result<(), MatchError> {
        let violation = |reason: String| {
            warn!("Rejecting {side} features: {reason}");
            MatchError::ContractViolation { side, reason }
        };

        for (category, skills) in features.skills.iter() {
            if skills.is_empty() {
                continue;
            }
            if !self.categories.contains(&category) {
                return Err(violation(format!(
                    "skill category '{category}' is not in the keyword dictionary"
                )));
            }
            for skill in skills {
                if skill.trim().is_empty() {
                    return Err(violation(format!("empty skill token in '{category}'")));
                }
                if *skill != skill.to_lowercase() {
                    return Err(violation(format!(
                        "skill token '{skill}' in '{category}' is not lowercase"
                    )));
                }
            }
        }

        if let Some(unknown) = features.education.iter().find(|e| !is_education_level(e)) {
            return Err(violation(format!("unknown education level '{unknown}'")));
        }

        Ok(())
    }

    /// Scores one candidate against one job.
    pub fn score(
        &self,
        candidate: &DocumentBundle,
        job: &DocumentBundle,
    ) -> Result<MatchResult, MatchError> {
        self.validate(DocumentSide::Candidate, &candidate.features)?;
        self.validate(DocumentSide::Job, &job.features)?;

        let skills = compute_skill_overlap(&candidate.features.skills, &job.features.skills);
        let similarity = text_similarity(&candidate.full_text, &job.full_text);
        let education =
            compute_education_score(&candidate.features.education, &job.features.education);

        debug!(
            skills = skills.score,
            similarity, education, "Scored candidate/job pair"
        );

        Ok(assemble(skills, similarity, education, &self.weights))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn dictionary() -> KeywordDictionary {
        KeywordDictionary::from_json_str(
            r#"{
                "languages": ["python", "java", "rust"],
                "frameworks": ["django"],
                "tools": ["docker"]
            }"#,
        )
        .unwrap()
    }

    fn bundle(languages: &[&str], education: &[&str], text: &str) -> DocumentBundle {
        DocumentBundle {
            features: FeatureSet {
                skills: SkillSet {
                    languages: strings(languages),
                    ..Default::default()
                },
                education: set(education),
                emails: BTreeSet::new(),
            },
            full_text: text.to_string(),
        }
    }

    #[test]
    fn test_skill_overlap_half_match() {
        let candidate = SkillSet {
            languages: strings(&["python"]),
            ..Default::default()
        };
        let job = SkillSet {
            languages: strings(&["python", "java"]),
            ..Default::default()
        };
        let overlap = compute_skill_overlap(&candidate, &job);
        assert_eq!(overlap.score, 0.5);
        assert_eq!(overlap.matching, set(&["python"]));
        assert_eq!(overlap.missing, set(&["java"]));
    }

    #[test]
    fn test_skill_overlap_empty_job_is_zero_regardless_of_candidate() {
        let candidate = SkillSet {
            languages: strings(&["python", "rust"]),
            tools: strings(&["docker"]),
            ..Default::default()
        };
        let overlap = compute_skill_overlap(&candidate, &SkillSet::default());
        assert_eq!(overlap.score, 0.0);
        assert!(overlap.matching.is_empty());
        assert!(overlap.missing.is_empty());
    }

    #[test]
    fn test_skill_overlap_ignores_categories_and_extra_skills() {
        let candidate = SkillSet {
            tools: strings(&["python", "docker", "git"]),
            ..Default::default()
        };
        let job = SkillSet {
            languages: strings(&["python"]),
            ..Default::default()
        };
        let overlap = compute_skill_overlap(&candidate, &job);
        assert_eq!(overlap.score, 1.0);
        assert!(overlap.missing.is_empty());
    }

    #[test]
    fn test_skill_overlap_sets_are_disjoint_and_missing_within_job() {
        let candidate = SkillSet {
            languages: strings(&["python", "rust"]),
            ..Default::default()
        };
        let job = SkillSet {
            languages: strings(&["python", "java"]),
            tools: strings(&["docker", "python"]),
            ..Default::default()
        };
        let overlap = compute_skill_overlap(&candidate, &job);
        assert!(overlap.matching.is_disjoint(&overlap.missing));
        let job_flat = job.flatten();
        assert!(overlap.missing.iter().all(|s| job_flat.contains(s.as_str())));
        // Duplicate "python" across categories counts once.
        assert!((overlap.score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_education_empty_requirement_is_full_credit() {
        assert_eq!(compute_education_score(&set(&[]), &set(&[])), 1.0);
        assert_eq!(compute_education_score(&set(&["bac"]), &set(&[])), 1.0);
    }

    #[test]
    fn test_education_any_overlap_passes() {
        assert_eq!(
            compute_education_score(&set(&["master", "licence"]), &set(&["master"])),
            1.0
        );
    }

    #[test]
    fn test_education_no_overlap_fails() {
        assert_eq!(compute_education_score(&set(&["licence"]), &set(&["master"])), 0.0);
        assert_eq!(compute_education_score(&set(&[]), &set(&["master"])), 0.0);
    }

    #[test]
    fn test_round2_is_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(72.0), 72.0);
        assert_eq!(round2(33.333333), 33.33);
    }

    #[test]
    fn test_aggregate_formula() {
        let skills = SkillOverlap {
            score: 0.8,
            ..Default::default()
        };
        let result = assemble(skills, 0.4, 1.0, &MatchWeights::default());
        assert_eq!(result.total_score, 72.0);
        assert_eq!(result.skill_score, 80.0);
        assert_eq!(result.text_similarity, 40.0);
        assert_eq!(result.education_score, 100.0);
    }

    #[test]
    fn test_combined_score_full_and_empty() {
        let w = MatchWeights::default();
        assert!((compute_combined_score(1.0, 1.0, 1.0, &w) - 1.0).abs() < f64::EPSILON);
        assert_eq!(compute_combined_score(0.0, 0.0, 0.0, &w), 0.0);
    }

    #[test]
    fn test_end_to_end_score() {
        let matcher = Matcher::new(&dictionary());
        let candidate = bundle(&["python"], &[], "");
        let job = bundle(&["python", "java"], &[], "python java developer");

        let result = matcher.score(&candidate, &job).unwrap();
        assert_eq!(result.skill_score, 50.0);
        assert_eq!(result.matching_skills, set(&["python"]));
        assert_eq!(result.missing_skills, set(&["java"]));
        // Candidate text missing: similarity collapses to 0, education is unconstrained.
        assert_eq!(result.text_similarity, 0.0);
        assert_eq!(result.education_score, 100.0);
        assert_eq!(result.total_score, 45.0);
    }

    #[test]
    fn test_identical_documents_score_full_marks() {
        let matcher = Matcher::new(&dictionary());
        let doc = bundle(&["python", "rust"], &["master"], "python rust systems engineer");

        let result = matcher.score(&doc, &doc).unwrap();
        assert_eq!(result.total_score, 100.0);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_scores_are_bounded() {
        let matcher = Matcher::new(&dictionary());
        let candidate = bundle(&["rust"], &["phd"], "rust");
        let job = bundle(&["python"], &["master"], "cooking");

        let result = matcher.score(&candidate, &job).unwrap();
        for score in [
            result.total_score,
            result.skill_score,
            result.text_similarity,
            result.education_score,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
        assert_eq!(result.total_score, 0.0);
    }

    #[test]
    fn test_category_outside_dictionary_is_contract_violation() {
        let dict = KeywordDictionary::from_json_str(r#"{"languages": ["python"]}"#).unwrap();
        let matcher = Matcher::new(&dict);
        let mut job = bundle(&["python"], &[], "");
        job.features.skills.tools = strings(&["docker"]);

        let err = matcher.score(&bundle(&[], &[], ""), &job).unwrap_err();
        match err {
            MatchError::ContractViolation { side, reason } => {
                assert_eq!(side, DocumentSide::Job);
                assert!(reason.contains("tools"));
            }
        }
    }

    #[test]
    fn test_empty_category_outside_dictionary_is_allowed() {
        let dict = KeywordDictionary::from_json_str(r#"{"languages": ["python"]}"#).unwrap();
        let matcher = Matcher::new(&dict);
        let doc = bundle(&["python"], &[], "");
        assert!(matcher.score(&doc, &doc).is_ok());
    }

    #[test]
    fn test_uppercase_skill_is_contract_violation() {
        let matcher = Matcher::new(&dictionary());
        let candidate = bundle(&["Python"], &[], "");
        let err = matcher.score(&candidate, &bundle(&[], &[], "")).unwrap_err();
        assert!(err.to_string().contains("candidate"));
        assert!(err.to_string().contains("not lowercase"));
    }

    #[test]
    fn test_empty_skill_token_is_contract_violation() {
        let matcher = Matcher::new(&dictionary());
        let candidate = bundle(&[" "], &[], "");
        assert!(matcher.score(&candidate, &bundle(&[], &[], "")).is_err());
    }

    #[test]
    fn test_unknown_education_is_contract_violation() {
        let matcher = Matcher::new(&dictionary());
        let job = bundle(&[], &["masters degree"], "");
        let err = matcher.score(&bundle(&[], &[], ""), &job).unwrap_err();
        assert!(err.to_string().contains("masters degree"));
    }

    #[test]
    fn test_default_weights() {
        let w = MatchWeights::default();
        assert_eq!((w.skills, w.text_similarity, w.education), (0.5, 0.3, 0.2));
        let matcher = Matcher::new(&dictionary());
        assert_eq!(matcher.weights(), &w);
    }
}
