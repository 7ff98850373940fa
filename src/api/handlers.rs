use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{Movie, MovieId, Prediction, RankedMovie, Rating, User, UserId};
use crate::services::{build_movie_report, rank_movies, MovieReport, Recommender};
use crate::store::{RatingOutcome, RatingStore};

use super::{AppJson, AppState};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub release_year: Option<i32>,
    pub imdb_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub outcome: RatingOutcome,
    pub rating: Rating,
}

#[derive(Debug, Serialize)]
pub struct UserRatingResponse {
    pub movie_id: MovieId,
    pub title: String,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    pub user: User,
    pub ratings: Vec<UserRatingResponse>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub user_rating: Option<u8>,
    pub prediction: Option<Prediction>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct TopMoviesQuery {
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let store = state.store.read().await;
    Json(store.users().to_vec())
}

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.store.write().await.add_user(&request.email)?;

    tracing::info!(request_id = %request_id, user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user with the movies they have rated
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<UserDetailResponse>> {
    let store = state.store.read().await;
    let user = store
        .user(user_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;

    let ratings = store
        .ratings_of(user_id)
        .into_iter()
        .filter_map(|rating| {
            store
                .movie(rating.movie_id)
                .map(|movie| UserRatingResponse {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score: rating.score,
                })
        })
        .collect();

    Ok(Json(UserDetailResponse { user, ratings }))
}

/// Predict a user's score for a movie they have not rated
pub async fn get_prediction(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((user_id, movie_id)): Path<(UserId, MovieId)>,
) -> AppResult<Json<PredictionResponse>> {
    let store = state.store.read().await;
    if store.user(user_id).is_none() {
        return Err(AppError::NotFound(format!("User {}", user_id)));
    }
    if store.movie(movie_id).is_none() {
        return Err(AppError::NotFound(format!("Movie {}", movie_id)));
    }

    let user_rating = store.rating(user_id, movie_id).map(|r| r.score);
    let prediction = match user_rating {
        Some(_) => None,
        None => Recommender::new(&*store).predict(user_id, movie_id),
    };

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        movie_id = %movie_id,
        predicted = prediction.is_some(),
        "Prediction served"
    );

    Ok(Json(PredictionResponse {
        user_id,
        movie_id,
        user_rating,
        prediction,
    }))
}

/// Get the catalog in title order
pub async fn get_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let store = state.store.read().await;
    Json(store.all_movies())
}

/// Add a movie to the catalog
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = state.store.write().await.add_movie(
        &request.title,
        request.release_year,
        request.imdb_url,
    )?;

    tracing::info!(request_id = %request_id, movie_id = %movie.id, "Movie added");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Movie page: ratings, average, prediction and the reference rater's verdict
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<MovieReport>> {
    let store = state.store.read().await;
    let report = build_movie_report(
        &store,
        movie_id,
        query.user_id,
        &state.config.reference_rater_email,
    )?;
    Ok(Json(report))
}

/// Add a rating, or update the existing one for the same user and movie
pub async fn submit_rating(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<SubmitRatingRequest>,
) -> AppResult<(StatusCode, Json<RatingResponse>)> {
    let outcome = state.store.write().await.submit_rating(
        request.user_id,
        request.movie_id,
        request.score,
    )?;

    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        movie_id = %request.movie_id,
        score = request.score,
        outcome = ?outcome,
        "Rating submitted"
    );

    let status = match outcome {
        RatingOutcome::Created => StatusCode::CREATED,
        RatingOutcome::Updated => StatusCode::OK,
    };
    let rating = Rating::new(request.user_id, request.movie_id, request.score);

    Ok((status, Json(RatingResponse { outcome, rating })))
}

/// Highest-rated movies, capped at the configured or requested limit
pub async fn get_top_movies(
    State(state): State<AppState>,
    Query(query): Query<TopMoviesQuery>,
) -> Json<Vec<RankedMovie>> {
    let limit = query.limit.unwrap_or(state.config.top_movies_limit);
    let store = state.store.read().await;
    Json(rank_movies(&*store, &store.all_movies(), limit))
}
