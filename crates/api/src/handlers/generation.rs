//! Stateless generation endpoints: image generation and stats preview.
//! Neither persists anything.

use axum::extract::State;
use axum::Json;
use bitlings_core::error::CoreError;
use bitlings_core::generation::GeneratedBundle;
use bitlings_generator::StatsRequest;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub url: String,
}

/// Request body for the stats preview. Missing fields are reported
/// together as one validation error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewStatsRequest {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// POST /api/v1/generate-image
pub async fn generate_image(
    State(state): State<AppState>,
    AppJson(body): AppJson<GenerateImageRequest>,
) -> AppResult<Json<DataResponse<GenerateImageResponse>>> {
    let prompt = body.prompt.trim();
    if prompt.is_empty() {
        return Err(CoreError::Validation("prompt is required".into()).into());
    }

    let url = state.generator.generate_image(prompt).await?;
    Ok(Json(DataResponse {
        data: GenerateImageResponse { url },
    }))
}

/// POST /api/v1/generate-stats
///
/// Generate a repaired bundle for a creature that is not stored yet.
pub async fn preview_stats(
    State(state): State<AppState>,
    AppJson(body): AppJson<PreviewStatsRequest>,
) -> AppResult<Json<DataResponse<GeneratedBundle>>> {
    let request = StatsRequest {
        name: body.name,
        description: body.description,
        image_url: body.image_url,
    };
    request.validate()?;

    let normalized = state.generator.generate_stats(&request).await?;
    Ok(Json(DataResponse {
        data: normalized.bundle,
    }))
}
