//! Emotion Classifier: decodes an uploaded image, reduces it to the 48×48 grayscale
//! tensor the FER model expects and picks the most probable label.
//!
//! The model itself sits behind `EmotionModel` so the runtime can be swapped
//! (or faked in tests). `OnnxEmotionModel` is the production backend.

use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use bytes::Bytes;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tract_onnx::prelude::*;

use crate::errors::AppError;

/// Side length of the square input the classifier was trained on.
pub const INPUT_SIDE: u32 = 48;

/// NHWC layout: batch=1, 48×48, channel=1.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIDE as usize, INPUT_SIDE as usize, 1];

/// Fixed label ordering of the model's output vector.
pub const EMOTION_LABELS: [Emotion; 7] = [
    Emotion::Angry,
    Emotion::Disgust,
    Emotion::Fear,
    Emotion::Happy,
    Emotion::Sad,
    Emotion::Surprise,
    Emotion::Neutral,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("model runtime error: {0}")]
    Runtime(String),

    #[error("model produced {got} scores, expected {expected}")]
    OutputShape { got: usize, expected: usize },
}

/// Result of one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionPrediction {
    pub emotion: Emotion,
    /// Probability the model assigned to `emotion`.
    pub confidence: f32,
}

/// A loaded classifier over `EMOTION_LABELS`.
///
/// `predict` receives a flat NHWC buffer of `INPUT_SHAPE` and returns one score per label.
/// Implementations must be safe to call from many requests at once.
pub trait EmotionModel: Send + Sync {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ClassifierError>;
}

/// ONNX export of the FER classifier, optimized once at load and read-only afterwards.
pub struct OnnxEmotionModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxEmotionModel {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact(INPUT_SHAPE).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| anyhow!("failed to load emotion model from {}: {e:#}", path.display()))?;

        Ok(Self { plan })
    }
}

impl EmotionModel for OnnxEmotionModel {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        let tensor = Tensor::from_shape::<f32>(&INPUT_SHAPE, input)
            .map_err(|e| ClassifierError::Runtime(format!("{e:#}")))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ClassifierError::Runtime(format!("{e:#}")))?;

        let scores = outputs
            .first()
            .ok_or_else(|| ClassifierError::Runtime("model returned no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Runtime(format!("{e:#}")))?
            .iter()
            .copied()
            .collect();

        Ok(scores)
    }
}

/// Decodes `bytes` and produces the normalized 48×48 grayscale buffer.
pub fn preprocess(bytes: &[u8]) -> Result<Vec<f32>, ClassifierError> {
    let decoded = image::load_from_memory(bytes)?;
    let gray = decoded.to_luma8();
    let face = image::imageops::resize(&gray, INPUT_SIDE, INPUT_SIDE, FilterType::Triangle);

    Ok(face.pixels().map(|p| f32::from(p.0[0]) / 255.0).collect())
}

/// Index and value of the highest score. Ties resolve to the lowest index.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        // NaN never wins, unlike numpy's argmax which returns the first NaN.
        if score.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best
}

/// Runs one full classification synchronously.
pub fn classify_blocking(
    model: &dyn EmotionModel,
    bytes: &[u8],
) -> Result<EmotionPrediction, ClassifierError> {
    let input = preprocess(bytes)?;
    let scores = model.predict(&input)?;

    if scores.len() != EMOTION_LABELS.len() {
        return Err(ClassifierError::OutputShape {
            got: scores.len(),
            expected: EMOTION_LABELS.len(),
        });
    }

    let (index, confidence) = argmax(&scores).ok_or_else(|| {
        ClassifierError::Runtime("model produced no comparable scores".to_string())
    })?;

    Ok(EmotionPrediction {
        emotion: EMOTION_LABELS[index],
        confidence,
    })
}

/// Classifies an uploaded image on the blocking pool.
pub async fn classify(
    model: Arc<dyn EmotionModel>,
    bytes: Bytes,
) -> Result<EmotionPrediction, AppError> {
    let result = tokio::task::spawn_blocking(move || classify_blocking(model.as_ref(), &bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow!("classifier task failed: {e}")))?;

    result.map_err(|e| match e {
        ClassifierError::Decode(inner) => AppError::InvalidImage(inner.to_string()),
        other => AppError::Internal(anyhow!(other)),
    })
}
