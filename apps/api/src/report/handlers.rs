//! Axum route handlers for the Report API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::report::aggregator::{generate_final_report, FinalReport, FinalReportInput};
use crate::report::candidates::{list_candidate_summaries, CandidateSummary, CANDIDATES_CAPABILITY};
use crate::report::{placeholder_marker, PLACEHOLDER_HEADER};
use crate::state::AppState;

fn marker_headers(sections: &[(&str, crate::report::Capability)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(value) = placeholder_marker(sections) {
        headers.insert(PLACEHOLDER_HEADER, value);
    }
    headers
}

/// POST /report/generate
///
/// Builds the final candidate report. Sections produced by placeholder
/// components are named in the `x-placeholder-data` response header.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<FinalReportInput>, JsonRejection>,
) -> Result<(HeaderMap, Json<FinalReport>), AppError> {
    let Json(input) = payload?;

    let report = generate_final_report(
        &input,
        state.resume_summarizer.as_ref(),
        state.transcript_scorer.as_ref(),
    )
    .await?;

    info!(
        candidate_id = %report.candidate_id,
        emotion_frames = input.emotion_labels.len(),
        score = ?report.interview_score,
        "Final report generated"
    );

    let headers = marker_headers(&[("resume_summary", state.resume_summarizer.capability())]);
    Ok((headers, Json(report)))
}

/// GET /report/candidates
///
/// Fixed placeholder list until candidate reports are persisted.
pub async fn handle_list_candidates() -> (HeaderMap, Json<Vec<CandidateSummary>>) {
    let headers = marker_headers(&[("candidates", CANDIDATES_CAPABILITY)]);
    (headers, Json(list_candidate_summaries()))
}
