use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::nlp::keywords::SkillCategory;

/// Skills found in one document, one list per fixed category.
///
/// Lists keep discovery order (dictionary order when produced by the extractor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillSet {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl SkillSet {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Languages => &self.languages,
            SkillCategory::Frameworks => &self.frameworks,
            SkillCategory::Tools => &self.tools,
            SkillCategory::SoftSkills => &self.soft_skills,
        }
    }

    pub fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Languages => &mut self.languages,
            SkillCategory::Frameworks => &mut self.frameworks,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::SoftSkills => &mut self.soft_skills,
        }
    }

    /// Iterates every category, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &[String])> + '_ {
        SkillCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Union of all categories as a plain set. Category boundaries are discarded.
    pub fn flatten(&self) -> BTreeSet<&str> {
        self.iter()
            .flat_map(|(_, skills)| skills.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, skills)| skills.is_empty())
    }
}

/// Structured features extracted from one résumé or job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    pub skills: SkillSet,
    pub education: BTreeSet<String>,
    pub emails: BTreeSet<String>,
}

/// Features plus the full normalized text, i.e. one side of a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBundle {
    pub features: FeatureSet,
    #[serde(default)]
    pub full_text: String,
}

/// Output of analyzing a raw document: cleaned text alongside its features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    pub cleaned_text: String,
    pub features: FeatureSet,
}

impl AnalyzedDocument {
    pub fn into_bundle(self) -> DocumentBundle {
        DocumentBundle {
            features: self.features,
            full_text: self.cleaned_text,
        }
    }
}
