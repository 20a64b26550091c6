//! Axum route handlers for the Emotion API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::info;

use crate::emotion::classifier::{classify, EmotionPrediction};
use crate::errors::AppError;
use crate::state::AppState;

/// Name of the multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// POST /emotion/analyze
///
/// Classifies the facial emotion in one uploaded image.
/// Undecodable uploads are a 400, never a server error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EmotionPrediction>, AppError> {
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            upload = Some(field.bytes().await?);
            break;
        }
    }

    let bytes = upload.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{UPLOAD_FIELD}' is required"))
    })?;
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let size = bytes.len();
    let prediction = classify(state.emotion_model.clone(), bytes).await?;

    info!(
        bytes = size,
        emotion = prediction.emotion.as_str(),
        confidence = prediction.confidence,
        "Emotion classified"
    );

    Ok(Json(prediction))
}
