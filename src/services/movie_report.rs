use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, Prediction, Rating, UserId},
    store::{InMemoryStore, RatingStore},
};

use super::{
    divergence::{classify, effective_score, judgment},
    prediction::{mean_score, Recommender},
};

/// How far the viewer's taste is from the reference rater's
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Divergence {
    pub bucket: usize,
    pub judgment: &'static str,
}

/// Everything shown on a movie's page
#[derive(Debug, Clone, Serialize)]
pub struct MovieReport {
    pub movie: Movie,
    pub ratings: Vec<Rating>,
    /// Mean of all scores, absent while nobody has rated the movie
    pub average: Option<f64>,
    pub user_rating: Option<u8>,
    /// Only computed when the viewer has not rated the movie
    pub prediction: Option<Prediction>,
    pub effective_score: Option<f64>,
    pub reference_score: Option<f64>,
    pub divergence: Option<Divergence>,
}

/// Builds the movie page for an optional viewer
///
/// The reference rater is looked up by email. When they are missing from
/// the store, or either side has no effective score, no divergence is
/// reported.
pub fn build_movie_report(
    store: &InMemoryStore,
    movie_id: MovieId,
    viewer: Option<UserId>,
    reference_email: &str,
) -> AppResult<MovieReport> {
    let movie = store
        .movie(movie_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", movie_id)))?;

    if let Some(viewer) = viewer {
        if store.user(viewer).is_none() {
            return Err(AppError::NotFound(format!("User {}", viewer)));
        }
    }

    let engine = Recommender::new(store);
    let ratings = store.ratings_for(movie_id);
    let average = mean_score(&ratings);

    let user_rating = viewer
        .and_then(|viewer| store.rating(viewer, movie_id))
        .map(|r| r.score);
    let prediction = match (viewer, user_rating) {
        (Some(viewer), None) => engine.predict(viewer, movie_id),
        _ => None,
    };
    let effective = effective_score(user_rating, prediction.as_ref());

    let reference_score = match store.user_by_email(reference_email) {
        Some(reference) => {
            let real = store.rating(reference.id, movie_id).map(|r| r.score);
            let predicted = match real {
                Some(_) => None,
                None => engine.predict(reference.id, movie_id),
            };
            effective_score(real, predicted.as_ref())
        }
        None => {
            tracing::warn!(email = %reference_email, "Reference rater not found");
            None
        }
    };

    let divergence = classify(reference_score, effective).map(|bucket| Divergence {
        bucket,
        judgment: judgment(bucket),
    });

    Ok(MovieReport {
        movie,
        ratings,
        average,
        user_rating,
        prediction,
        effective_score: effective,
        reference_score,
        divergence,
    })
}
