//! Axum route handlers for the Interview API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::interview::scorer::TranscriptScore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreInterviewRequest {
    pub transcript: String,
}

/// POST /interview/score
///
/// Scores a raw interview transcript, passed to the scorer as-is (empty included).
/// An unusable LLM reply yields `{score: null, feedback: ...}` with 200;
/// upstream failures are 5xx.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreInterviewRequest>, JsonRejection>,
) -> Result<Json<TranscriptScore>, AppError> {
    let Json(request) = payload?;

    let result = state.transcript_scorer.score(&request.transcript).await?;

    info!(
        transcript_chars = request.transcript.chars().count(),
        score = ?result.score,
        "Interview transcript scored"
    );

    Ok(Json(result))
}
