use std::collections::HashMap;

use crate::models::{MovieId, Rating};

/// Fewest co-rated movies for which a correlation is meaningful
pub const MIN_CO_RATED: usize = 2;

/// Pearson correlation between two users over the movies both have rated
///
/// Returns `None` when fewer than [`MIN_CO_RATED`] movies are shared or when
/// either user's scores on the shared movies have no variance. Callers treat
/// `None` as "skip this neighbor", never as zero similarity.
///
/// Pairs are accumulated in movie id order so the result does not depend on
/// argument order.
pub fn similarity(a: &[Rating], b: &[Rating]) -> Option<f64> {
    let a_scores: HashMap<MovieId, f64> = a.iter().map(|r| (r.movie_id, r.value())).collect();

    let mut pairs: Vec<(MovieId, f64, f64)> = b
        .iter()
        .filter_map(|r| a_scores.get(&r.movie_id).map(|&score| (r.movie_id, score, r.value())))
        .collect();

    if pairs.len() < MIN_CO_RATED {
        return None;
    }
    pairs.sort_by_key(|&(movie, _, _)| movie);

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|&(_, x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|&(_, _, y)| y).sum::<f64>() / n;

    let (mut covariance, mut variance_a, mut variance_b) = (0.0, 0.0, 0.0);
    for &(_, x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    if variance_a == 0.0 || variance_b == 0.0 {
        return None;
    }

    Some((covariance / (variance_a * variance_b).sqrt()).clamp(-1.0, 1.0))
}
