pub mod divergence;
pub mod movie_report;
pub mod prediction;
pub mod ranking;
pub mod similarity;

pub use divergence::{classify, effective_score, judgment, JUDGMENTS};
pub use movie_report::{build_movie_report, Divergence, MovieReport};
pub use prediction::{mean_score, Recommender};
pub use ranking::rank_movies;
pub use similarity::similarity;
