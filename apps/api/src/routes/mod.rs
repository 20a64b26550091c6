pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::emotion;
use crate::errors::AppError;
use crate::interview;
use crate::report;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Emotion API
        .route(
            "/emotion/analyze",
            post(emotion::handlers::handle_analyze).layer(upload_limit),
        )
        // Interview API
        .route("/interview/score", post(interview::handlers::handle_score))
        // Report API
        .route("/report/generate", post(report::handlers::handle_generate))
        .route(
            "/report/candidates",
            get(report::handlers::handle_list_candidates),
        )
        // Resume parsing service (not built yet)
        .route("/resume/parse", post(not_implemented))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::emotion::classifier::{ClassifierError, EmotionModel, EMOTION_LABELS};
    use crate::interview::scorer::{LlmTranscriptScorer, DEGRADED_FEEDBACK};
    use crate::llm_client::LlmClient;
    use crate::report::resume::{PlaceholderResumeSummarizer, ResumeSummarizer};

    const BOUNDARY: &str = "smarthire-test-boundary";

    /// Always answers "surprise" (index 5).
    struct SurprisedModel;

    impl EmotionModel for SurprisedModel {
        fn predict(&self, _input: &[f32]) -> Result<Vec<f32>, ClassifierError> {
            Ok(vec![0.05, 0.05, 0.05, 0.05, 0.05, 0.7, 0.05])
        }
    }

    fn test_config(llm_base_url: &str) -> Config {
        Config {
            openai_api_key: "test-key".into(),
            llm_base_url: llm_base_url.into(),
            llm_timeout: Duration::from_secs(5),
            emotion_model_path: PathBuf::from("unused.onnx"),
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "debug".into(),
        }
    }

    fn test_app(server: &MockServer) -> Router {
        let config = test_config(&server.uri());
        let llm = LlmClient::new(
            config.openai_api_key.clone(),
            &config.llm_base_url,
            config.llm_timeout,
        )
        .unwrap();

        build_router(AppState {
            config,
            emotion_model: Arc::new(SurprisedModel),
            transcript_scorer: Arc::new(LlmTranscriptScorer(llm)),
            resume_summarizer: Arc::new(PlaceholderResumeSummarizer),
        })
    }

    async fn mock_llm_reply(server: &MockServer, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": reply}}]
            })))
            .mount(server)
            .await;
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(64, 64, Rgb([180, 140, 120]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageOutputFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"face.png\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/emotion/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_message() {
        let server = MockServer::start().await;
        let response = test_app(&server).oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "AI Hire Platform API is up"})
        );
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(get_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_emotion_returns_taxonomy_label() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(multipart_request("file", &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["emotion"], "surprise");
        assert!(EMOTION_LABELS
            .iter()
            .any(|e| body["emotion"] == e.as_str()));
    }

    #[tokio::test]
    async fn test_analyze_emotion_rejects_undecodable_upload() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(multipart_request("file", b"%PDF-1.4 not an image"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_IMAGE");
    }

    #[tokio::test]
    async fn test_analyze_emotion_requires_file_field() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(multipart_request("photo", &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }

    #[tokio::test]
    async fn test_analyze_emotion_rejects_non_multipart_body() {
        let server = MockServer::start().await;
        let request = json_request("/emotion/analyze", json!({"file": "abc"}));
        let response = test_app(&server).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_interview_passes_through_llm_score() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, r#"{"score": 73, "feedback": "Good job"}"#).await;

        let response = test_app(&server)
            .oneshot(json_request(
                "/interview/score",
                json!({"transcript": "Q: explain ownership. A: ..."}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"score": 73, "feedback": "Good job"})
        );
    }

    #[tokio::test]
    async fn test_score_interview_degrades_on_non_json_reply() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, "I cannot help with that").await;

        let response = test_app(&server)
            .oneshot(json_request(
                "/interview/score",
                json!({"transcript": "some transcript"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"score": null, "feedback": DEGRADED_FEEDBACK})
        );
    }

    #[tokio::test]
    async fn test_score_interview_is_idempotent() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, r#"{"score": 55, "feedback": "Average"}"#).await;
        let app = test_app(&server);

        let first = app
            .clone()
            .oneshot(json_request("/interview/score", json!({"transcript": "t"})))
            .await
            .unwrap();
        let second = app
            .oneshot(json_request("/interview/score", json!({"transcript": "t"})))
            .await
            .unwrap();

        assert_eq!(body_json(first).await, body_json(second).await);
    }

    #[tokio::test]
    async fn test_score_interview_rejects_malformed_body() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(json_request("/interview/score", json!({"text": "wrong key"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }

    #[tokio::test]
    async fn test_score_interview_hides_upstream_failure_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("db password=hunter2"))
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(json_request("/interview/score", json!({"transcript": "t"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_generate_report() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, r#"{"score": 81, "feedback": "Strong"}"#).await;

        let response = test_app(&server)
            .oneshot(json_request(
                "/report/generate",
                json!({
                    "candidate_id": "abc123",
                    "resume_text": "Alice Johnson, backend engineer",
                    "interview_transcript": "Q: ... A: ...",
                    "emotion_labels": ["happy", "neutral", "happy", "sad", "neutral"]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(&report::PLACEHOLDER_HEADER).unwrap(),
            "resume_summary"
        );

        let body = body_json(response).await;
        let expected_resume =
            serde_json::to_value(PlaceholderResumeSummarizer.summarize("")).unwrap();
        assert_eq!(
            body,
            json!({
                "candidate_id": "abc123",
                "resume_summary": expected_resume,
                "emotion_summary": {"happy": 2, "neutral": 2, "sad": 1},
                "interview_score": 81,
                "interview_feedback": "Strong"
            })
        );
    }

    #[tokio::test]
    async fn test_generate_report_rejects_missing_fields() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(json_request(
                "/report/generate",
                json!({"candidate_id": "abc123"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_emotion_rejects_upload_over_limit() {
        let server = MockServer::start().await;
        let oversized = vec![0u8; 2 * 1024 * 1024];
        let response = test_app(&server)
            .oneshot(multipart_request("file", &oversized))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "PAYLOAD_TOO_LARGE"
        );
    }

    #[tokio::test]
    async fn test_score_interview_accepts_empty_transcript() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, r#"{"score": 0, "feedback": "Nothing was said"}"#).await;

        let response = test_app(&server)
            .oneshot(json_request("/interview/score", json!({"transcript": ""})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"score": 0, "feedback": "Nothing was said"})
        );
    }

    #[tokio::test]
    async fn test_generate_report_passes_empty_strings_through() {
        let server = MockServer::start().await;
        mock_llm_reply(&server, r#"{"score": 5, "feedback": "Empty interview"}"#).await;

        let response = test_app(&server)
            .oneshot(json_request(
                "/report/generate",
                json!({
                    "candidate_id": "",
                    "resume_text": "",
                    "interview_transcript": "",
                    "emotion_labels": []
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["candidate_id"], "");
        assert_eq!(body["emotion_summary"], json!({}));
        assert_eq!(body["interview_score"], 5);
    }

    #[tokio::test]
    async fn test_list_candidates_is_stable() {
        let server = MockServer::start().await;
        let app = test_app(&server);

        let first = app
            .clone()
            .oneshot(get_request("/report/candidates"))
            .await
            .unwrap();
        assert_eq!(
            first.headers().get(&report::PLACEHOLDER_HEADER).unwrap(),
            "candidates"
        );
        let first = body_json(first).await;

        let second = body_json(
            app.oneshot(get_request("/report/candidates"))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first.as_array().unwrap().len(), 2);
        assert_eq!(first, second);
        assert_eq!(first[0]["name"], "Alice Johnson");
        assert_eq!(first[1]["score"], 75);
    }

    #[tokio::test]
    async fn test_resume_parse_is_not_implemented() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(json_request("/resume/parse", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
