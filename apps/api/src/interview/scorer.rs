//! Transcript Scorer — pluggable, trait-based scorer for interview transcripts.
//!
//! Default: `LlmTranscriptScorer`, which asks the LLM for a `{score, feedback}` JSON
//! object and verifies the reply before trusting it.
//!
//! `AppState` holds an `Arc<dyn TranscriptScorer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::interview::prompts::INTERVIEW_SCORING_SYSTEM;
use crate::llm_client::{strip_json_fences, ChatMessage, LlmClient};

/// Feedback returned when the LLM reply cannot be used.
pub const DEGRADED_FEEDBACK: &str = "AI failed to return a valid response. Please try again.";

/// Sampling temperature for scoring calls; low for repeatable grades.
pub const SCORING_TEMPERATURE: f32 = 0.3;

pub const MAX_SCORE: u32 = 100;

/// Outcome of scoring one transcript.
/// `score: None` means the LLM reply was unusable and `feedback` explains that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptScore {
    pub score: Option<u32>,
    pub feedback: String,
}

impl TranscriptScore {
    pub fn degraded() -> Self {
        Self {
            score: None,
            feedback: DEGRADED_FEEDBACK.to_string(),
        }
    }
}

/// The transcript scorer trait. Implement this to swap backends without touching
/// the handlers or the report aggregator.
#[async_trait]
pub trait TranscriptScorer: Send + Sync {
    async fn score(&self, transcript: &str) -> Result<TranscriptScore, AppError>;
}

/// Scores transcripts with one chat-completion call per transcript.
pub struct LlmTranscriptScorer(pub LlmClient);

#[async_trait]
impl TranscriptScorer for LlmTranscriptScorer {
    async fn score(&self, transcript: &str) -> Result<TranscriptScore, AppError> {
        let messages = [
            ChatMessage::system(INTERVIEW_SCORING_SYSTEM),
            ChatMessage::user(transcript),
        ];

        // Transport and provider failures propagate; only the reply content is degraded.
        let reply = self.0.complete_chat(&messages, SCORING_TEMPERATURE).await?;

        Ok(parse_score_reply(&reply).unwrap_or_else(|reason| {
            warn!("Discarding LLM scoring reply: {reason}");
            TranscriptScore::degraded()
        }))
    }
}

#[derive(Debug, Deserialize)]
struct RawScoreReply {
    score: serde_json::Number,
    feedback: String,
}

/// Validates an LLM reply against `{"score": integer 0..=100, "feedback": string}`.
/// Returns the reason on any violation.
pub fn parse_score_reply(reply: &str) -> Result<TranscriptScore, String> {
    let raw: RawScoreReply = serde_json::from_str(strip_json_fences(reply))
        .map_err(|e| format!("reply is not a valid score object: {e}"))?;

    let score = integral_score(&raw.score)
        .ok_or_else(|| format!("score {} is not a non-negative integer", raw.score))?;

    if score > u64::from(MAX_SCORE) {
        return Err(format!("score {score} is outside 0..={MAX_SCORE}"));
    }

    Ok(TranscriptScore {
        score: Some(score as u32),
        feedback: raw.feedback,
    })
}

/// Accepts `73` and `73.0`; rejects negatives and fractional values.
fn integral_score(n: &serde_json::Number) -> Option<u64> {
    if let Some(v) = n.as_u64() {
        return Some(v);
    }
    match n.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    }
}
