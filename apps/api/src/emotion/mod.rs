// Emotion analysis: single-image facial emotion classification.
// The model is loaded once at startup and shared read-only through AppState.

pub mod classifier;
pub mod handlers;
