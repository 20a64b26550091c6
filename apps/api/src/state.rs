use std::sync::Arc;

use crate::config::Config;
use crate::emotion::classifier::EmotionModel;
use crate::interview::scorer::TranscriptScorer;
use crate::report::resume::ResumeSummarizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every field is read-only after startup; nothing here changes between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// FER classifier, loaded once in `main` before the listener binds.
    pub emotion_model: Arc<dyn EmotionModel>,
    /// Pluggable transcript scorer. Default: LlmTranscriptScorer.
    pub transcript_scorer: Arc<dyn TranscriptScorer>,
    /// Placeholder until a resume parser exists; check `capability()`.
    pub resume_summarizer: Arc<dyn ResumeSummarizer>,
}
