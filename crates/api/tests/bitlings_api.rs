//! Integration tests for `/api/v1/bitlings`.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use bitlings_db::BitlingStore;
use common::{body_json, get, post_json, submit_bitling};
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_returns_201_with_defaults() {
    let test = common::build_test_app();
    let body = json!({
        "name": "Glimmer",
        "prompt": "A moth made of stained glass",
        "imageUrl": "https://images.test/glimmer.png",
        "creatorHandle": "lampwright",
    });

    let response = post_json(test.app(), "/api/v1/bitlings", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = &body_json(response).await["data"];
    assert_eq!(data["name"], "Glimmer");
    assert_eq!(data["status"], "proposed");
    assert_eq!(data["upvotes"], 0);
    assert_eq!(data["downvotes"], 0);
    assert_eq!(data["votes"], 0);
    assert_eq!(data["types"], json!(["normal"]));
    assert_eq!(data["creatorHandle"], "lampwright");
    assert!(data["stats"].is_null());
}

#[tokio::test]
async fn submit_without_image_is_a_validation_error() {
    let test = common::build_test_app();
    let body = json!({ "name": "Glimmer", "prompt": "A moth" });

    let response = post_json(test.app(), "/api/v1/bitlings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(test.store.count_proposals().await.unwrap(), 0);
}

#[tokio::test]
async fn submit_with_blank_name_is_a_validation_error() {
    let test = common::build_test_app();
    let body = json!({ "name": "", "prompt": "A moth", "imageUrl": "x" });

    let response = post_json(test.app(), "/api/v1/bitlings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let test = common::build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/bitlings")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn submit_with_full_bundle_stores_repaired_stats() {
    let test = common::build_test_app();
    let body = json!({
        "name": "Voltkit",
        "prompt": "A kit fox that hums",
        "imageUrl": "https://images.test/voltkit.png",
        "types": ["Electric", "dragon"],
        "stats": { "hp": 150, "attack": 70, "defense": 50, "speed": 95 },
        "moves": [
            { "name": "Spark", "type": "electric", "power": 40, "pp": 30, "maxPp": 30 },
            { "name": "Charge Up", "type": "electric", "power": 0 },
        ],
        "description": "Hums at night.",
        "behavior": "Curious.",
    });

    let response = post_json(test.app(), "/api/v1/bitlings", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = &body_json(response).await["data"];
    assert_eq!(data["types"], json!(["electric", "normal"]));
    assert_eq!(data["stats"]["hp"], 100);
    assert_eq!(data["moves"].as_array().unwrap().len(), 2);
    assert_eq!(data["moves"][1]["category"], "status");

    let id = data["id"].as_str().unwrap();
    let fetched = body_json(get(test.app(), &format!("/api/v1/bitlings/{id}")).await).await;
    assert_eq!(fetched["data"]["stats"]["speed"], 95);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_paginates_newest_first() {
    let test = common::build_test_app();
    for i in 1..=12 {
        submit_bitling(test.app(), &format!("Mon{i:02}"), &["normal"]).await;
    }

    let json = body_json(get(test.app(), "/api/v1/bitlings?page=2&limit=5").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Mon07", "Mon06", "Mon05", "Mon04", "Mon03"]);

    let json = body_json(get(test.app(), "/api/v1/bitlings?page=9&limit=5").await).await;
    assert_eq!(json["data"], json!([]));

    let json = body_json(get(test.app(), "/api/v1/bitlings").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn list_rejects_non_positive_paging() {
    let test = common::build_test_app();

    for uri in ["/api/v1/bitlings?page=0", "/api/v1/bitlings?limit=-3"] {
        let response = get(test.app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn list_rejects_unknown_sort_and_status() {
    let test = common::build_test_app();

    let response = get(test.app(), "/api/v1/bitlings?sort=oldest").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(test.app(), "/api/v1/bitlings?status=rejected").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_filters_by_status_and_sorts_by_votes() {
    let test = common::build_test_app();
    test.store
        .load_demo(common::DEFAULT_USER, &test.state.rules)
        .await;

    let json = body_json(get(test.app(), "/api/v1/bitlings?status=voting&sort=topRated").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["PSYCAT", "FROSTBITE"]);
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leaderboard_defaults_to_weekly_window() {
    let test = common::build_test_app();
    test.store
        .load_demo(common::DEFAULT_USER, &test.state.rules)
        .await;

    let json = body_json(get(test.app(), "/api/v1/bitlings/leaderboard").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["FLAMELOX", "ZAPZAP", "LEAFLET", "PSYCAT", "FROSTBITE"]);
}

#[tokio::test]
async fn leaderboard_all_time_respects_limit_and_alias() {
    let test = common::build_test_app();
    test.store
        .load_demo(common::DEFAULT_USER, &test.state.rules)
        .await;

    for uri in [
        "/api/v1/bitlings/leaderboard?timeframe=allTime&limit=3",
        "/api/v1/bitlings/leaderboard?timeFrame=allTime&limit=3",
    ] {
        let json = body_json(get(test.app(), uri).await).await;
        let votes: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["votes"].as_i64().unwrap())
            .collect();
        assert_eq!(votes, [35, 26, 21], "{uri}");
    }

    let response = get(test.app(), "/api/v1/bitlings/leaderboard?limit=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let test = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = get(test.app(), &format!("/api/v1/bitlings/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_malformed_id_returns_400() {
    let test = common::build_test_app();
    let response = get(test.app(), "/api/v1/bitlings/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Stats generation for a stored proposal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_stats_persists_bundle_once() {
    let test = common::build_test_app();
    let id = submit_bitling(test.app(), "Cinder", &["normal"]).await;
    let uri = format!("/api/v1/bitlings/{id}/generate-stats");

    let response = post_json(test.app(), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["message"], "Stats generated successfully");
    assert_eq!(json["data"]["stats"]["types"], json!(["fire", "ghost"]));

    // Moves were missing from the model output and got the baseline move.
    let moves = json["data"]["stats"]["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0]["power"], 40);
    assert_eq!(moves[0]["category"], "physical");
    assert_eq!(moves[0]["levelLearned"], 1);

    let fetched = body_json(get(test.app(), &format!("/api/v1/bitlings/{id}")).await).await;
    assert_eq!(fetched["data"]["types"], json!(["fire", "ghost"]));
    assert_eq!(fetched["data"]["stats"]["attack"], 80);

    let response = post_json(test.app(), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(test.generator.call_count(), 1);
}

#[tokio::test]
async fn generate_stats_for_unknown_bitling_returns_404() {
    let test = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = post_json(
        test.app(),
        &format!("/api/v1/bitlings/{id}/generate-stats"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(test.generator.call_count(), 0);
}

#[tokio::test]
async fn generator_failure_stores_nothing() {
    let test = common::build_test_app_with(
        common::test_config(),
        common::FakeGenerator::failing(),
    );
    let id = submit_bitling(test.app(), "Cinder", &["fire"]).await;

    let response = post_json(
        test.app(),
        &format!("/api/v1/bitlings/{id}/generate-stats"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "EXTERNAL_SERVICE_ERROR");

    let fetched = body_json(get(test.app(), &format!("/api/v1/bitlings/{id}")).await).await;
    assert!(fetched["data"]["stats"].is_null());
    assert_eq!(fetched["data"]["types"], json!(["fire"]));
}
