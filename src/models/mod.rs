use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lowest score a user can submit
pub const MIN_SCORE: u8 = 1;
/// Highest score a user can submit
pub const MAX_SCORE: u8 = 5;

/// Arena identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

/// Arena identifier for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u32);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
///
/// Credentials are owned by the authentication layer; the email is only
/// used as a stable handle (e.g. to locate the reference rater).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

/// A movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_year: Option<i32>,
    pub imdb_url: Option<String>,
}

/// A user's score for a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub score: u8,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, score: u8) -> Self {
        Self {
            user_id,
            movie_id,
            score,
        }
    }

    /// Score as a float for averaging and correlation
    pub fn value(&self) -> f64 {
        f64::from(self.score)
    }
}

/// Checks a submitted score against the rating scale
pub fn is_valid_score(score: u8) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// Where a predicted score came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PredictionSource {
    /// Weighted average over positively correlated neighbors
    Neighbors { count: usize },
    /// Plain mean of every rating for the movie
    MovieAverage,
}

/// A predicted score for an unrated (user, movie) pair
///
/// Computed on read and never stored as a rating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub score: f64,
    pub source: PredictionSource,
}

/// A movie together with its mean score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedMovie {
    pub mean_score: f64,
    pub movie: Movie,
}
