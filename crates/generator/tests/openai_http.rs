//! `OpenAiGenerator` against a local HTTP stub.
//!
//! Covers the transport edge: non-2xx answers and unreachable hosts surface
//! as errors that map to `ExternalService`, while a 200 answer with messy
//! content still yields a repaired bundle.

use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use bitlings_core::creature::CreatureType;
use bitlings_core::error::CoreError;
use bitlings_core::generation::Repair;
use bitlings_generator::{Generator, GeneratorConfig, GeneratorError, OpenAiGenerator, StatsRequest};
use tokio::net::TcpListener;

/// Serve `body` with `status` on both model endpoints; returns the base URL.
async fn stub(status: StatusCode, body: &'static str) -> String {
    let reply = move || async move { (status, body) };
    let app = Router::new()
        .route("/chat/completions", post(reply))
        .route("/images/generations", post(reply));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn generator(api_url: String) -> OpenAiGenerator {
    let config = GeneratorConfig {
        api_key: "test-key".into(),
        api_url,
        chat_model: "gpt-4o".into(),
        image_model: "dall-e-3".into(),
        timeout: Duration::from_secs(5),
    };
    OpenAiGenerator::with_client(reqwest::Client::new(), config)
}

fn request() -> StatsRequest {
    StatsRequest {
        name: "Wisp".into(),
        description: "A floating ember".into(),
        image_url: "https://images.test/wisp.png".into(),
    }
}

#[tokio::test]
async fn server_error_maps_to_external_service() {
    let url = stub(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;

    let err = generator(url).generate_stats(&request()).await.unwrap_err();
    assert_matches!(
        &err,
        GeneratorError::Api { status: 500, body } if body == "upstream exploded"
    );
    assert_matches!(CoreError::from(err), CoreError::ExternalService(_));
}

#[tokio::test]
async fn unreachable_host_maps_to_external_service() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = generator(format!("http://{addr}"))
        .generate_stats(&request())
        .await
        .unwrap_err();
    assert_matches!(&err, GeneratorError::Request(_));
    assert_matches!(CoreError::from(err), CoreError::ExternalService(_));
}

#[tokio::test]
async fn prose_around_json_is_repaired() {
    let url = stub(
        StatusCode::OK,
        r#"{"choices": [{"message": {"content": "Sure! Here it is:\n{\"types\": [\"fire\"], \"stats\": {\"hp\": 500, \"attack\": 60, \"defense\": 55, \"speed\": 70}}\nEnjoy."}}]}"#,
    )
    .await;

    let normalized = generator(url).generate_stats(&request()).await.unwrap();
    assert_eq!(normalized.bundle.types, vec![CreatureType::Fire]);
    assert_eq!(normalized.bundle.stats.hp, 100);
    assert_eq!(normalized.bundle.stats.speed, 70);
    assert_eq!(normalized.bundle.moves.len(), 1);
    assert!(normalized.repairs.contains(&Repair::MissingMoves));
}

#[tokio::test]
async fn image_failure_and_success() {
    let url = stub(StatusCode::BAD_GATEWAY, "bad gateway").await;
    assert_matches!(
        generator(url).generate_image("a frost fox").await,
        Err(GeneratorError::Api { status: 502, .. })
    );

    let url = stub(StatusCode::OK, r#"{"data": [{"url": "https://cdn.test/fox.png"}]}"#).await;
    assert_eq!(
        generator(url).generate_image("a frost fox").await.unwrap(),
        "https://cdn.test/fox.png"
    );
}
