use serde::Serialize;
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{is_valid_score, Movie, MovieId, Rating, User, UserId, MAX_SCORE, MIN_SCORE},
};

use super::RatingStore;

/// What a rating submission did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingOutcome {
    Created,
    Updated,
}

/// Arena-backed store for users, movies and ratings
///
/// Users and movies live in vectors addressed by id (ids start at 1).
/// Ratings are indexed by author, by target and by (author, target) so the
/// one-rating-per-pair rule is enforced on write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: Vec<User>,
    movies: Vec<Movie>,
    ratings: Vec<Rating>,
    by_pair: HashMap<(UserId, MovieId), usize>,
    by_user: HashMap<UserId, Vec<usize>>,
    by_movie: HashMap<MovieId, Vec<usize>>,
}

fn slot(id: u32) -> Option<usize> {
    (id as usize).checked_sub(1)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user; emails are unique ignoring case
    pub fn add_user(&mut self, email: &str) -> AppResult<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::InvalidInput("Email must not be empty".to_string()));
        }
        if self.user_by_email(email).is_some() {
            return Err(AppError::Conflict(format!("Account already exists: {}", email)));
        }

        let user = User {
            id: UserId(self.users.len() as u32 + 1),
            email: email.to_string(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        slot(id.0).and_then(|i| self.users.get(i))
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Adds a movie to the catalog
    pub fn add_movie(
        &mut self,
        title: &str,
        release_year: Option<i32>,
        imdb_url: Option<String>,
    ) -> AppResult<Movie> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("Title must not be empty".to_string()));
        }

        let movie = Movie {
            id: MovieId(self.movies.len() as u32 + 1),
            title: title.to_string(),
            release_year,
            imdb_url,
        };
        self.movies.push(movie.clone());
        Ok(movie)
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        slot(id.0).and_then(|i| self.movies.get(i))
    }

    pub fn movie_by_title(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.title == title.trim())
    }

    /// The user's own rating of a movie, if any
    pub fn rating(&self, user: UserId, movie: MovieId) -> Option<Rating> {
        self.by_pair
            .get(&(user, movie))
            .map(|&index| self.ratings[index])
    }

    /// Records a score, replacing the previous one for the same pair
    pub fn submit_rating(
        &mut self,
        user: UserId,
        movie: MovieId,
        score: u8,
    ) -> AppResult<RatingOutcome> {
        if !is_valid_score(score) {
            return Err(AppError::InvalidInput(format!(
                "Score must be between {} and {}, got {}",
                MIN_SCORE, MAX_SCORE, score
            )));
        }
        if self.user(user).is_none() {
            return Err(AppError::NotFound(format!("User {}", user)));
        }
        if self.movie(movie).is_none() {
            return Err(AppError::NotFound(format!("Movie {}", movie)));
        }

        if let Some(&index) = self.by_pair.get(&(user, movie)) {
            self.ratings[index].score = score;
            return Ok(RatingOutcome::Updated);
        }

        let index = self.ratings.len();
        self.ratings.push(Rating::new(user, movie, score));
        self.by_pair.insert((user, movie), index);
        self.by_user.entry(user).or_default().push(index);
        self.by_movie.entry(movie).or_default().push(index);
        Ok(RatingOutcome::Created)
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    fn collect(&self, indices: Option<&Vec<usize>>) -> Vec<Rating> {
        indices
            .map(|indices| indices.iter().map(|&i| self.ratings[i]).collect())
            .unwrap_or_default()
    }
}

impl RatingStore for InMemoryStore {
    fn ratings_of(&self, user: UserId) -> Vec<Rating> {
        self.collect(self.by_user.get(&user))
    }

    fn ratings_for(&self, movie: MovieId) -> Vec<Rating> {
        self.collect(self.by_movie.get(&movie))
    }

    /// Catalog order is alphabetical by title
    fn all_movies(&self) -> Vec<Movie> {
        let mut movies = self.movies.clone();
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        movies
    }
}
