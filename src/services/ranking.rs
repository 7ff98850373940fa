use crate::{
    models::{Movie, RankedMovie},
    store::RatingStore,
};

use super::prediction::mean_score;

/// Ranks movies by mean score, highest first
///
/// Movies nobody has rated are left out instead of being ranked last. Equal
/// means keep their input order, so passing movies in catalog order yields
/// reproducible output. At most `limit` movies are returned.
pub fn rank_movies<S: RatingStore + ?Sized>(
    store: &S,
    movies: &[Movie],
    limit: usize,
) -> Vec<RankedMovie> {
    let mut ranked: Vec<RankedMovie> = movies
        .iter()
        .filter_map(|movie| {
            mean_score(&store.ratings_for(movie.id)).map(|mean_score| RankedMovie {
                mean_score,
                movie: movie.clone(),
            })
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.mean_score.total_cmp(&a.mean_score));
    ranked.truncate(limit);
    ranked
}
