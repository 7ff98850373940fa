use crate::models::Prediction;

/// Commentary for each divergence bucket, mildest first
pub const JUDGMENTS: [&str; 5] = [
    "I suppose you don't have such bad taste after all.",
    "I regret every decision that I've ever made that has brought me to listen to your opinion.",
    "Words fail me, as your taste in movies has clearly failed you.",
    "That movie is great. For a clown to watch. Idiot.",
    "Words cannot express the awfulness of your taste.",
];

/// Buckets the gap between two effective scores
///
/// The absolute difference is truncated toward zero and used as the bucket
/// index; gaps past the last bucket land in the last bucket. Nothing is
/// produced when either score is missing.
pub fn classify(a: Option<f64>, b: Option<f64>) -> Option<usize> {
    let difference = (a? - b?).abs();
    Some((difference.trunc() as usize).min(JUDGMENTS.len() - 1))
}

/// Commentary text for a bucket, clamped to the table
pub fn judgment(bucket: usize) -> &'static str {
    JUDGMENTS[bucket.min(JUDGMENTS.len() - 1)]
}

/// The score that applies to a user/movie pair at presentation time
///
/// A real rating wins over a prediction.
pub fn effective_score(rating: Option<u8>, prediction: Option<&Prediction>) -> Option<f64> {
    rating
        .map(f64::from)
        .or_else(|| prediction.map(|p| p.score))
}
