use std::collections::HashMap;

use crate::{
    models::{MovieId, Prediction, PredictionSource, Rating, UserId},
    store::RatingStore,
};

use super::similarity::similarity;

/// Collaborative-filtering engine over a rating store
///
/// Holds nothing but a borrowed store, so every call sees whatever snapshot
/// the caller is holding.
pub struct Recommender<'a, S: RatingStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RatingStore + ?Sized> Recommender<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Similarity between two users, see [`similarity`]
    pub fn similarity(&self, a: UserId, b: UserId) -> Option<f64> {
        similarity(&self.store.ratings_of(a), &self.store.ratings_of(b))
    }

    /// Predicts how `user` would score `movie`
    ///
    /// Meant for pairs the user has not rated. Calling it on a rated pair is
    /// legal; the user is never their own neighbor, but their score still
    /// counts toward the fallback mean.
    ///
    /// Only positively correlated neighbors contribute, weighted by their
    /// similarity. With no such neighbor the movie's plain mean is used, and
    /// a movie nobody has rated has no prediction.
    pub fn predict(&self, user: UserId, movie: MovieId) -> Option<Prediction> {
        let movie_ratings = self.store.ratings_for(movie);
        if movie_ratings.is_empty() {
            return None;
        }

        let scores: HashMap<UserId, f64> = movie_ratings
            .iter()
            .map(|r| (r.user_id, r.value()))
            .collect();
        let target = self.store.ratings_of(user);

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut neighbors = 0;

        for neighbor in self.store.users_who_rated(movie) {
            if neighbor == user {
                continue;
            }
            let Some(&score) = scores.get(&neighbor) else {
                continue;
            };
            match similarity(&target, &self.store.ratings_of(neighbor)) {
                Some(sim) if sim > 0.0 => {
                    weighted_sum += sim * score;
                    weight_total += sim;
                    neighbors += 1;
                }
                _ => {}
            }
        }

        tracing::debug!(
            user_id = %user,
            movie_id = %movie,
            raters = movie_ratings.len(),
            neighbors,
            "Computed prediction neighbors"
        );

        if neighbors > 0 {
            return Some(Prediction {
                score: weighted_sum / weight_total,
                source: PredictionSource::Neighbors { count: neighbors },
            });
        }

        mean_score(&movie_ratings).map(|score| Prediction {
            score,
            source: PredictionSource::MovieAverage,
        })
    }
}

/// Arithmetic mean of a set of ratings, `None` when empty
pub fn mean_score(ratings: &[Rating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().map(Rating::value).sum::<f64>() / ratings.len() as f64)
}
