//! Text similarity: TF-IDF over a two-document corpus, compared by cosine.
//!
//! Weighting matches the usual smoothed scheme:
//! - tf  = raw term count in the document
//! - idf = ln((1 + n) / (1 + df)) + 1, with n = 2
//! - each vector is L2-normalized, similarity is their dot product
//!
//! Every degenerate case (empty text, no usable tokens) resolves to 0.0.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

const CORPUS_SIZE: f64 = 2.0;

/// English stop words, the same list scikit-learn ships as `ENGLISH_STOP_WORDS`.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "computer", "con", "could", "couldnt",
        "cry", "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
        "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
        "fify", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
        "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
        "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
        "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
        "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
        "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no",
        "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often",
        "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
        "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "rather",
        "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she",
        "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow",
        "someone", "something", "sometime", "sometimes", "somewhere", "still", "such", "system",
        "take", "ten", "than", "that", "the", "their", "them", "themselves", "then", "thence",
        "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
        "thick", "thickv", "thin", "third", "this", "those", "though", "three", "through",
        "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards",
        "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via",
        "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
        "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which",
        "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
        "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases and splits on non-word characters. Tokens shorter than two
/// characters and English stop words are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|token| token.chars().count() >= 2 && !STOP_WORDS.contains(*token))
        .map(str::to_string)
        .collect()
}

fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Sparse, L2-normalized term-weight vector. Terms are kept sorted so that
/// dot products accumulate in the same order regardless of argument order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        self.weights
            .iter()
            .filter_map(|(term, weight)| other.weights.get(term).map(|w| weight * w))
            .sum()
    }
}

fn weigh(counts: BTreeMap<String, f64>, other: &BTreeMap<String, f64>) -> Option<TermVector> {
    let mut weights: BTreeMap<String, f64> = counts
        .into_iter()
        .map(|(term, tf)| {
            let df = if other.contains_key(&term) { 2.0 } else { 1.0 };
            let idf = ((1.0 + CORPUS_SIZE) / (1.0 + df)).ln() + 1.0;
            (term, tf * idf)
        })
        .collect();

    let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
    if !norm.is_finite() || norm <= 0.0 {
        return None;
    }
    for weight in weights.values_mut() {
        *weight /= norm;
    }
    Some(TermVector { weights })
}

/// Builds the TF-IDF vectors for a two-document corpus.
/// `None` when either document has no usable tokens.
pub fn tfidf_vectors(first: &str, second: &str) -> Option<(TermVector, TermVector)> {
    let first_counts = term_counts(first);
    let second_counts = term_counts(second);
    if first_counts.is_empty() || second_counts.is_empty() {
        return None;
    }

    let first_vector = weigh(first_counts.clone(), &second_counts)?;
    let second_vector = weigh(second_counts, &first_counts)?;
    Some((first_vector, second_vector))
}

/// Cosine similarity of the two texts' TF-IDF vectors, in [0, 1].
pub fn text_similarity(first: &str, second: &str) -> f64 {
    if first.trim().is_empty() || second.trim().is_empty() {
        return 0.0;
    }

    match tfidf_vectors(first, second) {
        Some((a, b)) => {
            let similarity = a.dot(&b);
            if similarity.is_finite() {
                similarity.clamp(0.0, 1.0)
            } else {
                0.0
            }
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Python developer with Django and Docker experience building REST APIs";
    const JOB: &str = "We are hiring a Python developer to build REST APIs with Flask and Docker";

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("The C developer is in a team of 5");
        assert_eq!(tokens, vec!["developer".to_string(), "team".to_string()]);
    }

    #[test]
    fn test_tokenize_keeps_underscores_and_accents() {
        let tokens = tokenize("snake_case Ingénieur");
        assert_eq!(tokens, vec!["snake_case".to_string(), "ingénieur".to_string()]);
    }

    #[test]
    fn test_identical_texts_have_similarity_one() {
        let sim = text_similarity(RESUME, RESUME);
        assert!((sim - 1.0).abs() < 1e-9, "sim was {sim}");
    }

    #[test]
    fn test_disjoint_texts_have_similarity_zero() {
        assert_eq!(text_similarity("rust tokio axum", "cooking baking pastry"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_strictly_between_zero_and_one() {
        let sim = text_similarity(RESUME, JOB);
        assert!(sim > 0.0 && sim < 1.0, "sim was {sim}");
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let pairs = [
            (RESUME, JOB),
            ("data engineer spark kafka", "kafka streaming engineer spark spark"),
            ("a b c", "python"),
        ];
        for (a, b) in pairs {
            assert!((text_similarity(a, b) - text_similarity(b, a)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(text_similarity("", JOB), 0.0);
        assert_eq!(text_similarity(RESUME, ""), 0.0);
        assert_eq!(text_similarity("   ", "  "), 0.0);
    }

    #[test]
    fn test_stop_words_only_is_zero_not_nan() {
        let sim = text_similarity("the and of to", "is was were be");
        assert_eq!(sim, 0.0);
        assert!(tfidf_vectors("the and of", "python").is_none());
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let (a, b) = tfidf_vectors(RESUME, JOB).unwrap();
        assert!((a.dot(&a) - 1.0).abs() < 1e-9);
        assert!((b.dot(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_terms_get_lower_idf_than_unique_terms() {
        // "python" is in both documents (idf 1.0), "django" only in one (idf 1 + ln 1.5).
        let (a, _) = tfidf_vectors("python django", "python flask").unwrap();
        assert!(a.get("django") > a.get("python"));
        assert_eq!(a.get("flask"), 0.0);
    }

    #[test]
    fn test_common_words_and_french_articles_are_stop_words() {
        assert!(tokenize("computer system found interest de un").is_empty());
        assert_eq!(
            tokenize("ingénieur de recherche"),
            vec!["ingénieur".to_string(), "recherche".to_string()]
        );
    }

    #[test]
    fn test_texts_sharing_only_stop_words_have_similarity_zero() {
        assert_eq!(text_similarity("computer science", "computer graphics"), 0.0);
    }

    #[test]
    fn test_known_value_for_small_corpus() {
        // Shared term weight 1, unique term weight w = 1 + ln(1.5).
        // Each vector is (1, w) over its own terms; overlap is only the shared term.
        let w = 1.0 + 1.5_f64.ln();
        let expected = 1.0 / (1.0 + w * w);
        let sim = text_similarity("python django", "python flask");
        assert!((sim - expected).abs() < 1e-12, "sim was {sim}, expected {expected}");
    }
}
