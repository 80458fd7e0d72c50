mod common;

use axum::http::StatusCode;
use common::{TestApp, TEST_TOKEN, TEST_USER_EMAIL};
use reqwest::Client;
use serde_json::{json, Value};

async fn seed_rated_movies(app: &TestApp, count: usize) {
    for i in 1..=count {
        app.seed_movie(json!({
            "title": format!("movie-{}", i),
            "rating": i as f64,
            "created_at": i as i64,
        }))
        .await;
    }
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("Expected a bare JSON array")
        .iter()
        .map(|movie| movie["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn latest_movies_returns_the_six_newest_descending() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    seed_rated_movies(&app, 8).await;

    let response = client
        .get(&format!("{}/latest-movie", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        titles(&body),
        vec![
            "movie-8", "movie-7", "movie-6", "movie-5", "movie-4", "movie-3"
        ]
    );

    app.cleanup().await;
}

#[tokio::test]
async fn latest_movies_returns_everything_when_fewer_than_six_exist() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    seed_rated_movies(&app, 3).await;

    let response = client
        .get(&format!("{}/latest-movie", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(titles(&body), vec!["movie-3", "movie-2", "movie-1"]);

    app.cleanup().await;
}

#[tokio::test]
async fn top_movies_returns_the_five_highest_rated() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    seed_rated_movies(&app, 7).await;

    let response = client
        .get(&format!("{}/topMovies", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        titles(&body),
        vec!["movie-7", "movie-6", "movie-5", "movie-4", "movie-3"]
    );

    app.cleanup().await;
}

#[tokio::test]
async fn genre_filter_composes_membership_and_rating_bounds() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    app.seed_movie(json!({ "title": "in-genre-high", "genre": "Action", "rating": 8.0 }))
        .await;
    app.seed_movie(json!({ "title": "in-genre-low", "genre": "Drama", "rating": 5.0 }))
        .await;
    app.seed_movie(json!({ "title": "off-genre-high", "genre": "Comedy", "rating": 9.0 }))
        .await;
    // Array-valued genre: membership, not exact match
    app.seed_movie(json!({ "title": "multi-genre", "genre": ["Action", "Comedy"], "rating": 7.0 }))
        .await;

    let response = client
        .get(&format!(
            "{}/genreMovies?genres=Action,Drama&minRating=7",
            app.address
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let mut found = titles(&body);
    found.sort();
    assert_eq!(found, vec!["in-genre-high", "multi-genre"]);

    app.cleanup().await;
}

#[tokio::test]
async fn genre_filter_bounds_are_inclusive() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    app.seed_movie(json!({ "title": "boundary", "genre": "Action", "rating": 7.0 }))
        .await;

    let response = client
        .get(&format!(
            "{}/genreMovies?minRating=7&maxRating=7",
            app.address
        ))
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(titles(&body), vec!["boundary"]);

    app.cleanup().await;
}

#[tokio::test]
async fn genre_filter_without_params_returns_the_unfiltered_list() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    seed_rated_movies(&app, 4).await;

    let response = client
        .get(&format!("{}/genreMovies", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.as_array().unwrap().len(), 4);

    app.cleanup().await;
}

#[tokio::test]
async fn genre_filter_with_no_matches_is_an_empty_array_not_an_error() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    app.seed_movie(json!({ "title": "only", "genre": "Action", "rating": 5.0 }))
        .await;

    let response = client
        .get(&format!("{}/genreMovies?genres=Western", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.as_array().unwrap().len(), 0);

    app.cleanup().await;
}

#[tokio::test]
async fn genre_filter_rejects_an_unparseable_rating() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!(
            "{}/genreMovies?minRating=not-a-number",
            app.address
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
}

#[tokio::test]
async fn my_collection_returns_only_the_requested_submitters_movies() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    app.seed_movie(json!({ "title": "mine", "addedBy": TEST_USER_EMAIL }))
        .await;
    app.seed_movie(json!({ "title": "also-mine", "addedBy": TEST_USER_EMAIL }))
        .await;
    app.seed_movie(json!({ "title": "theirs", "addedBy": "someone@example.com" }))
        .await;

    let response = client
        .get(&format!(
            "{}/movie/my-collection?email={}",
            app.address, TEST_USER_EMAIL
        ))
        .bearer_auth(TEST_TOKEN)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let mut found = titles(&body);
    found.sort();
    assert_eq!(found, vec!["also-mine", "mine"]);

    app.cleanup().await;
}

#[tokio::test]
async fn my_collection_requires_a_verified_identity() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!(
            "{}/movie/my-collection?email={}",
            app.address, TEST_USER_EMAIL
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.cleanup().await;
}

#[tokio::test]
async fn my_collection_requires_the_email_parameter() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/movie/my-collection", app.address))
        .bearer_auth(TEST_TOKEN)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await;
}
