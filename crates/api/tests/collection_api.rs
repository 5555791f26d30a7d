//! Integration tests for `/api/v1/collection`.

mod common;

use axum::http::{Method, StatusCode};
use bitlings_core::creature::CreatureType;
use bitlings_db::BitlingStore;
use common::{
    admin_set_status, body_json, get, get_with_headers, send_json, submit_bitling, ADMIN_TOKEN,
};
use serde_json::json;

async fn grant(app: axum::Router, user: &str, id: &str) -> axum::response::Response {
    send_json(
        app,
        Method::POST,
        &format!("/api/v1/admin/collection/{user}"),
        &json!({ "bitlingId": id }),
        &[("x-admin-token", ADMIN_TOKEN)],
    )
    .await
}

#[tokio::test]
async fn empty_collection_has_zeroed_stats() {
    let test = common::build_test_app();

    let json = body_json(get(test.app(), "/api/v1/collection").await).await;
    assert_eq!(json["data"], json!([]));

    let json = body_json(get(test.app(), "/api/v1/collection/stats").await).await;
    assert_eq!(
        json["data"],
        json!({
            "total": 0,
            "distinctTypeCount": 0,
            "rareCount": 0,
            "completionPercentage": 0,
            "completion": "0%",
        })
    );
}

#[tokio::test]
async fn demo_collection_is_ordered_by_level() {
    let test = common::build_test_app();
    test.store
        .load_demo(common::DEFAULT_USER, &test.state.rules)
        .await;

    let json = body_json(get(test.app(), "/api/v1/collection").await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 4);

    let levels: Vec<i64> = entries
        .iter()
        .map(|e| e["level"].as_i64().unwrap())
        .collect();
    assert!(levels.windows(2).all(|w| w[0] >= w[1]));
    assert!(entries.iter().all(|e| e["stats"].is_object()));

    let json = body_json(get(test.app(), "/api/v1/collection/stats").await).await;
    assert_eq!(json["data"]["total"], 4);
    assert_eq!(json["data"]["distinctTypeCount"], 4);
    assert_eq!(json["data"]["completionPercentage"], 10);
    assert_eq!(json["data"]["completion"], "10%");
}

#[tokio::test]
async fn collections_are_scoped_by_user_header() {
    let test = common::build_test_app();
    test.store
        .load_demo(common::DEFAULT_USER, &test.state.rules)
        .await;

    let json = body_json(
        get_with_headers(test.app(), "/api/v1/collection", &[("x-user-id", "ash")]).await,
    )
    .await;
    assert_eq!(json["data"], json!([]));

    let json = body_json(
        get_with_headers(
            test.app(),
            "/api/v1/collection",
            &[("x-user-id", common::DEFAULT_USER)],
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn overlong_user_header_is_rejected() {
    let test = common::build_test_app();
    let user = "u".repeat(200);

    let response = get_with_headers(test.app(), "/api/v1/collection", &[("x-user-id", user.as_str())]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn stats_count_distinct_types() {
    let test = common::build_test_app();

    for (name, types) in [("Blaze", ["fire"]), ("Drip", ["water"]), ("Scorch", ["fire"])] {
        let id = submit_bitling(test.app(), name, &types).await;
        admin_set_status(test.app(), &id, "accepted").await;
        let response = grant(test.app(), "ash", &id).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(
        get_with_headers(test.app(), "/api/v1/collection/stats", &[("x-user-id", "ash")]).await,
    )
    .await;
    let data = &json["data"];
    assert_eq!(data["total"], 3);
    assert_eq!(data["distinctTypeCount"], 2);
    assert!(data["rareCount"].as_u64().unwrap() <= 3);
    assert_eq!(data["completionPercentage"], 7);
    assert_eq!(data["completion"], "7%");
}

#[tokio::test]
async fn collected_entry_is_a_snapshot() {
    let test = common::build_test_app();
    let id = submit_bitling(test.app(), "Mossback", &["grass"]).await;
    admin_set_status(test.app(), &id, "accepted").await;
    grant(test.app(), "ash", &id).await;

    // Regenerating types on the source does not touch the collected copy.
    let uuid: uuid::Uuid = id.parse().unwrap();
    test.store
        .set_types(uuid, vec![CreatureType::Ice])
        .await
        .unwrap();

    let json = body_json(
        get_with_headers(test.app(), "/api/v1/collection", &[("x-user-id", "ash")]).await,
    )
    .await;
    assert_eq!(json["data"][0]["types"], json!(["grass"]));
    assert_eq!(json["data"][0]["bitlingId"], id.as_str());
}
