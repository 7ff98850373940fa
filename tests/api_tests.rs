use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_ratings::api::{create_router, AppState};
use movie_ratings::config::Config;
use movie_ratings::store::{InMemoryStore, Seed};

const SEED: &str = r#"{
    "users": [
        {"email": "the-eye@of-judgment.com"},
        {"email": "u1@example.com"},
        {"email": "u2@example.com"},
        {"email": "u3@example.com"}
    ],
    "movies": [
        {"title": "M1", "release_year": 1999},
        {"title": "M2"},
        {"title": "M3"},
        {"title": "Unrated"}
    ],
    "ratings": [
        {"email": "the-eye@of-judgment.com", "title": "M1", "score": 1},
        {"email": "u1@example.com", "title": "M1", "score": 5},
        {"email": "u1@example.com", "title": "M2", "score": 3},
        {"email": "u2@example.com", "title": "M1", "score": 4},
        {"email": "u2@example.com", "title": "M2", "score": 2},
        {"email": "u2@example.com", "title": "M3", "score": 4},
        {"email": "u3@example.com", "title": "M1", "score": 1},
        {"email": "u3@example.com", "title": "M2", "score": 5},
        {"email": "u3@example.com", "title": "M3", "score": 2}
    ]
}"#;

fn create_test_server() -> TestServer {
    TestServer::new(create_router(AppState::default())).unwrap()
}

fn create_seeded_server(config: Config) -> TestServer {
    let mut store = InMemoryStore::new();
    Seed::from_json(SEED).unwrap().apply(&mut store).unwrap();
    TestServer::new(create_router(AppState::new(store, config))).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_create_and_get_users() {
    let server = create_test_server();

    let response = server
        .post("/users")
        .json(&json!({ "email": "viewer@example.com" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["id"], 1);
    assert_eq!(created["email"], "viewer@example.com");

    let response = server
        .post("/users")
        .json(&json!({ "email": "viewer@example.com" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let users: Vec<Value> = server.get("/users").await.json();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_movies_listed_by_title() {
    let server = create_test_server();

    for title in ["Vertigo", "Alien"] {
        server
            .post("/movies")
            .json(&json!({ "title": title }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let movies: Vec<Value> = server.get("/movies").await.json();
    assert_eq!(movies[0]["title"], "Alien");
    assert_eq!(movies[1]["title"], "Vertigo");
}

#[tokio::test]
async fn test_submit_then_update_rating() {
    let server = create_seeded_server(Config::default());

    // u1 has not rated M3 yet
    let response = server
        .post("/ratings")
        .json(&json!({ "user_id": 2, "movie_id": 3, "score": 2 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["outcome"], "created");

    let response = server
        .post("/ratings")
        .json(&json!({ "user_id": 2, "movie_id": 3, "score": 4 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "updated");
    assert_eq!(body["rating"]["score"], 4);

    let user: Value = server.get("/users/2").await.json();
    let ratings = user["ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 3);
    assert!(ratings
        .iter()
        .any(|r| r["title"] == "M3" && r["score"] == 4));
}

#[tokio::test]
async fn test_rating_validation() {
    let server = create_seeded_server(Config::default());

    server
        .post("/ratings")
        .json(&json!({ "user_id": 2, "movie_id": 3, "score": 6 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Scores that do not even fit the wire type get the same JSON error
    for score in [json!(300), json!(-1), json!(3.5)] {
        let response = server
            .post("/ratings")
            .json(&json!({ "user_id": 2, "movie_id": 3, "score": score }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    let response = server
        .post("/users")
        .json(&json!({ "mail": "typo@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    server
        .post("/ratings")
        .json(&json!({ "user_id": 99, "movie_id": 3, "score": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prediction_weights_toward_similar_user() {
    let server = create_seeded_server(Config::default());

    let response = server.get("/users/2/predictions/3").await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["user_rating"], Value::Null);
    let score = body["prediction"]["score"].as_f64().unwrap();
    assert!((score - 4.0).abs() < 1e-9);
    assert_eq!(body["prediction"]["source"]["kind"], "neighbors");
}

#[tokio::test]
async fn test_no_prediction_for_rated_or_unrated_movie() {
    let server = create_seeded_server(Config::default());

    let body: Value = server.get("/users/2/predictions/1").await.json();
    assert_eq!(body["user_rating"], 5);
    assert_eq!(body["prediction"], Value::Null);

    let body: Value = server.get("/users/2/predictions/4").await.json();
    assert_eq!(body["prediction"], Value::Null);

    server
        .get("/users/2/predictions/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_movie_report_with_judgment() {
    let server = create_seeded_server(Config::default());

    let response = server.get("/movies/1").add_query_param("user_id", 2).await;
    response.assert_status_ok();
    let report: Value = response.json();

    assert_eq!(report["movie"]["title"], "M1");
    assert_eq!(report["ratings"].as_array().unwrap().len(), 4);
    assert_eq!(report["average"], 2.75);
    assert_eq!(report["user_rating"], 5);
    assert_eq!(report["effective_score"], 5.0);
    assert_eq!(report["reference_score"], 1.0);
    assert_eq!(report["divergence"]["bucket"], 4);
    assert_eq!(
        report["divergence"]["judgment"],
        "Words cannot express the awfulness of your taste."
    );
}

#[tokio::test]
async fn test_movie_report_for_anonymous_viewer() {
    let server = create_seeded_server(Config::default());

    let report: Value = server.get("/movies/4").await.json();
    assert_eq!(report["average"], Value::Null);
    assert_eq!(report["prediction"], Value::Null);
    assert_eq!(report["divergence"], Value::Null);

    server.get("/movies/42").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_top_movies() {
    let server = create_seeded_server(Config::default());

    let ranked: Vec<Value> = server.get("/top-movies").await.json();
    let titles: Vec<&str> = ranked
        .iter()
        .map(|r| r["movie"]["title"].as_str().unwrap())
        .collect();
    // M2 (10/3) and M3 (3.0) outrank M1 (2.75); the unrated movie never appears
    assert_eq!(titles, vec!["M2", "M3", "M1"]);

    let ranked: Vec<Value> = server
        .get("/top-movies")
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(ranked.len(), 1);
}

#[tokio::test]
async fn test_top_movies_respects_configured_limit() {
    let config = Config {
        top_movies_limit: 2,
        ..Config::default()
    };
    let server = create_seeded_server(config);

    let ranked: Vec<Value> = server.get("/top-movies").await.json();
    assert_eq!(ranked.len(), 2);
}
