use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let enable_cors = state.config.enable_cors;

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route(
            "/users",
            get(handlers::get_users).post(handlers::create_user),
        )
        .route("/users/:user_id", get(handlers::get_user))
        .route(
            "/users/:user_id/predictions/:movie_id",
            get(handlers::get_prediction),
        )
        // Movies
        .route(
            "/movies",
            get(handlers::get_movies).post(handlers::create_movie),
        )
        .route("/movies/:movie_id", get(handlers::get_movie))
        .route("/top-movies", get(handlers::get_top_movies))
        // Ratings
        .route("/ratings", post(handlers::submit_rating))
        .with_state(state);

    // Request id runs first so the trace span can pick it up
    let router = router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
    );

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
