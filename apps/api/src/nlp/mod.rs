// Document analysis: normalization, keyword dictionary, feature extraction, text similarity.
// Everything here is pure and CPU-bound; the dictionary is the only shared input.

pub mod extraction;
pub mod keywords;
pub mod normalize;
pub mod similarity;
