use serde::Deserialize;
use std::path::Path;

use super::InMemoryStore;

/// Initial catalog and ratings, keyed by email and title
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub movies: Vec<SeedMovie>,
    #[serde(default)]
    pub ratings: Vec<SeedRating>,
}

#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedMovie {
    pub title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub imdb_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedRating {
    pub email: String,
    pub title: String,
    pub score: u8,
}

impl Seed {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).map_err(|e| anyhow::anyhow!("Invalid seed file: {}", e))
    }

    /// Writes the seed into a store
    ///
    /// Ratings refer to movies by title, so a title may appear only once.
    /// Duplicate titles and ratings referring to unknown emails or titles
    /// abort the load.
    pub fn apply(self, store: &mut InMemoryStore) -> anyhow::Result<()> {
        for user in self.users {
            store.add_user(&user.email)?;
        }
        for movie in self.movies {
            if store.movie_by_title(&movie.title).is_some() {
                anyhow::bail!("Duplicate movie title in seed: {}", movie.title.trim());
            }
            store.add_movie(&movie.title, movie.release_year, movie.imdb_url)?;
        }
        for rating in self.ratings {
            let user = store
                .user_by_email(&rating.email)
                .map(|u| u.id)
                .ok_or_else(|| anyhow::anyhow!("Seed rating for unknown user {}", rating.email))?;
            let movie = store
                .movie_by_title(&rating.title)
                .map(|m| m.id)
                .ok_or_else(|| anyhow::anyhow!("Seed rating for unknown movie {}", rating.title))?;
            store.submit_rating(user, movie, rating.score)?;
        }
        Ok(())
    }
}

/// Builds a store from a JSON seed file
pub fn load_seed(path: impl AsRef<Path>) -> anyhow::Result<InMemoryStore> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read seed file {}: {}", path.display(), e))?;

    let mut store = InMemoryStore::new();
    Seed::from_json(&json)?.apply(&mut store)?;

    tracing::info!(
        path = %path.display(),
        users = store.users().len(),
        ratings = store.rating_count(),
        "Seed data loaded"
    );

    Ok(store)
}
