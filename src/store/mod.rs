use crate::models::{Movie, MovieId, Rating, UserId};

pub mod memory;
pub mod seed;

pub use memory::{InMemoryStore, RatingOutcome};
pub use seed::{load_seed, Seed};

/// Read access to rating data
///
/// The engine only ever reads through this trait. Implementations must hand
/// out a consistent snapshot for the duration of one engine call.
#[cfg_attr(test, mockall::automock)]
pub trait RatingStore {
    /// All ratings authored by a user
    fn ratings_of(&self, user: UserId) -> Vec<Rating>;

    /// All ratings targeting a movie
    fn ratings_for(&self, movie: MovieId) -> Vec<Rating>;

    /// Every movie in the catalog, in catalog order
    fn all_movies(&self) -> Vec<Movie>;

    /// Users who have rated a movie
    fn users_who_rated(&self, movie: MovieId) -> Vec<UserId> {
        self.ratings_for(movie)
            .into_iter()
            .map(|rating| rating.user_id)
            .collect()
    }
}
