//! Report Aggregator: composes the resume summary, the emotion frequency count and the
//! interview score into one `FinalReport`.
//!
//! The three parts are independent. A failure in any of them fails the whole report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::scorer::TranscriptScorer;
use crate::report::resume::{ResumeSummarizer, ResumeSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct FinalReportInput {
    pub candidate_id: String,
    pub resume_text: String,
    pub interview_transcript: String,
    /// Per-frame emotion labels in capture order; duplicates expected.
    pub emotion_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalReport {
    pub candidate_id: String,
    pub resume_summary: ResumeSummary,
    pub emotion_summary: BTreeMap<String, u32>,
    pub interview_score: Option<u32>,
    pub interview_feedback: String,
}

/// Frequency count over `labels`. Only labels that occur appear as keys.
pub fn count_emotions(labels: &[String]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

pub async fn generate_final_report(
    input: &FinalReportInput,
    summarizer: &dyn ResumeSummarizer,
    scorer: &dyn TranscriptScorer,
) -> Result<FinalReport, AppError> {
    let resume_summary = summarizer.summarize(&input.resume_text);
    let emotion_summary = count_emotions(&input.emotion_labels);
    let interview = scorer.score(&input.interview_transcript).await?;

    Ok(FinalReport {
        candidate_id: input.candidate_id.clone(),
        resume_summary,
        emotion_summary,
        interview_score: interview.score,
        interview_feedback: interview.feedback,
    })
}
