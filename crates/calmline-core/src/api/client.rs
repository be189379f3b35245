//! API client for communicating with the wellness backend.
//!
//! This module provides the `ApiClient` struct. Every endpoint makes exactly
//! one attempt. Most endpoints swallow failures and hand back a locally
//! synthesized payload (see `heuristics`); `chat`, `stt`, `tts` and
//! `analyze_journal_entry_upload` return the `ApiError` instead.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::{Session, TokenStore};
use crate::config::Config;
use crate::heuristics;
use crate::models::{
    AudioClip, AudioUpload, BaselineResult, ChatOptions, ChatReply, CheckInResult,
    CheckInSubmission, Exercise, HealthStatus, JournalAnalysis, JournalUpload, MoodSeries,
    MoodSeriesQuery, QuestionSet, RewriteResult, SafetyCheck, Transcript,
};
use crate::models::chat::ChatRequest;

use super::fallback::{handle_api_error, with_fallback};
use super::network::{self, NetworkStatus};
use super::request::{AuthPolicy, Body};
use super::{ApiError, ApiRequest};

// ============================================================================
// Endpoint paths
// ============================================================================

const HEALTH_PATH: &str = "/health";
const CHECKIN_QUESTIONS_PATH: &str = "/analytics/checkin/questions";
const CHECKIN_PATH: &str = "/analytics/checkin";
const ANALYZE_ENTRY_PATH: &str = "/ai/analyze-entry";
const ANALYZE_ENTRY_UPLOAD_PATH: &str = "/ai/analyze-entry-upload";
const CHAT_PATH: &str = "/api/chat";
const STT_PATH: &str = "/api/stt";
const TTS_PATH: &str = "/api/tts";
const BASELINE_QUESTIONS_PATH: &str = "/ai/get-baseline-questions";
const SCORE_BASELINE_PATH: &str = "/ai/score-baseline";
const REWRITE_PATH: &str = "/collab/rewrite";
const MOOD_SERIES_PATH: &str = "/analytics/series";
const EXERCISE_PATH: &str = "/ai/get-exercise";
const SAFETY_CHECK_PATH: &str = "/ai/safety-check";

/// API client for the wellness backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    chat_timeout: Duration,
    session: Session,
    network: NetworkStatus,
}

impl ApiClient {
    /// Create a client for `config`, loading any token `store` already holds.
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            request_timeout: config.request_timeout(),
            chat_timeout: config.chat_timeout(),
            session: Session::load(store),
            network: NetworkStatus::new(),
        })
    }

    /// Create a client using the token store named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config, config.token_store()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Session =====

    /// Hold `token` for subsequent requests and persist it.
    pub fn set_token(&mut self, token: String) -> Result<()> {
        self.session.set_token(token)
    }

    /// Drop the held token and delete it from storage.
    pub fn remove_token(&mut self) -> Result<()> {
        self.session.remove_token()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn network_status(&self) -> &NetworkStatus {
        &self.network
    }

    pub fn is_offline(&self) -> bool {
        network::is_offline(&self.network)
    }

    // ===== Request primitive =====

    fn build_headers(&self, request: &ApiRequest) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        if matches!(request.body, Body::Json(_)) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        if request.auth == AuthPolicy::Attach {
            if let Some(token) = self.session.token() {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ApiError::Other(format!("Invalid token: {}", e)))?;
                headers.insert(header::AUTHORIZATION, value);
            }
        }
        for (name, value) in &request.headers {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    fn send_error(&self, err: reqwest::Error) -> ApiError {
        let err = ApiError::from_send(err);
        if err == ApiError::Network {
            self.network.mark_offline();
        }
        err
    }

    /// Issue one request and return the successful response.
    /// Non-2xx statuses become `ApiError::HttpStatus`.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let headers = self.build_headers(&request)?;
        let timeout = request.timeout.unwrap_or(self.request_timeout);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers)
            .timeout(timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Multipart(form) => builder.multipart(form),
            Body::Invalid(msg) => {
                return Err(ApiError::Other(format!(
                    "Failed to serialize request body: {}",
                    msg
                )))
            }
        };

        debug!(method = %request.method, url = %url, timeout_ms = timeout.as_millis() as u64, "Sending request");
        let response = builder.send().await.map_err(|e| self.send_error(e))?;
        self.network.mark_online();

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Request failed");
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Issue one request and decode its JSON body.
    pub async fn request_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(ApiError::from_body)
    }

    // ===== Health =====

    /// Backend health. Never fails: an unusable backend reports itself as
    /// `status: "offline"` with the failure message.
    pub async fn health(&self) -> HealthStatus {
        match self.request_json(ApiRequest::get(HEALTH_PATH)).await {
            Ok(health) => health,
            Err(e) => {
                let offline = HealthStatus::offline(e.to_string());
                handle_api_error("health", &e, offline)
            }
        }
    }

    // ===== Endpoints with local fallbacks =====

    pub async fn get_checkin_questions(&self) -> QuestionSet {
        with_fallback(
            "checkin_questions",
            self.request_json(ApiRequest::get(CHECKIN_QUESTIONS_PATH)),
            heuristics::checkin_questions,
        )
        .await
    }

    pub async fn submit_checkin(&self, submission: &CheckInSubmission) -> CheckInResult {
        with_fallback(
            "submit_checkin",
            self.request_json(ApiRequest::post(CHECKIN_PATH).json(submission)),
            || heuristics::checkin_result(submission),
        )
        .await
    }

    pub async fn analyze_journal_entry(&self, text: &str) -> JournalAnalysis {
        with_fallback(
            "analyze_entry",
            self.request_json(ApiRequest::post(ANALYZE_ENTRY_PATH).json(&json!({ "text": text }))),
            || heuristics::journal_analysis(text),
        )
        .await
    }

    pub async fn get_baseline_questions(&self) -> QuestionSet {
        with_fallback(
            "baseline_questions",
            self.request_json(ApiRequest::get(BASELINE_QUESTIONS_PATH)),
            heuristics::baseline_questions,
        )
        .await
    }

    pub async fn submit_baseline(&self, answers: &BTreeMap<String, f64>) -> BaselineResult {
        with_fallback(
            "score_baseline",
            self.request_json(ApiRequest::post(SCORE_BASELINE_PATH).json(answers)),
            heuristics::baseline_result,
        )
        .await
    }

    pub async fn rewrite_text(&self, text: &str) -> RewriteResult {
        with_fallback(
            "rewrite",
            self.request_json(ApiRequest::post(REWRITE_PATH).json(&json!({ "text": text }))),
            || heuristics::rewrite(text),
        )
        .await
    }

    pub async fn get_mood_series(&self, query: &MoodSeriesQuery) -> MoodSeries {
        let mut request = ApiRequest::get(MOOD_SERIES_PATH);
        if let Some(ref user_id) = query.user_id {
            request = request.query_param("user_id", user_id);
        }
        if let Some(days) = query.days {
            request = request.query_param("days", days);
        }
        with_fallback("mood_series", self.request_json(request), heuristics::mood_series).await
    }

    pub async fn get_exercise(&self) -> Exercise {
        with_fallback(
            "exercise",
            self.request_json(ApiRequest::get(EXERCISE_PATH)),
            heuristics::exercise,
        )
        .await
    }

    pub async fn safety_check(&self, text: &str) -> SafetyCheck {
        with_fallback(
            "safety_check",
            self.request_json(ApiRequest::post(SAFETY_CHECK_PATH).json(&json!({ "text": text }))),
            heuristics::safety_check,
        )
        .await
    }

    // ===== Endpoints that propagate errors =====

    /// Upload a journal file for analysis. Sends the bearer token.
    pub async fn analyze_journal_entry_upload(
        &self,
        upload: JournalUpload,
    ) -> Result<JournalAnalysis, ApiError> {
        let part = file_part(upload.bytes, upload.file_name, &upload.mime_type)?;
        let mut form = Form::new().part("file", part);
        for (name, value) in upload.fields {
            form = form.text(name, value);
        }
        self.request_json(ApiRequest::post(ANALYZE_ENTRY_UPLOAD_PATH).multipart(form))
            .await
    }

    /// Send a chat message. Uses the longer chat timeout.
    pub async fn chat(
        &self,
        session_id: &str,
        message: &str,
        options: &ChatOptions,
    ) -> Result<ChatReply, ApiError> {
        let body = ChatRequest { message, options };
        let request = ApiRequest::post(format!("{}/{}", CHAT_PATH, session_id))
            .json(&body)
            .timeout(self.chat_timeout);
        self.request_json(request).await
    }

    /// Transcribe a recording. Sent without the bearer token.
    pub async fn stt(&self, audio: AudioUpload) -> Result<Transcript, ApiError> {
        let part = file_part(audio.bytes, audio.file_name, &audio.mime_type)?;
        let form = Form::new().part("audio", part);
        self.request_json(ApiRequest::post(STT_PATH).multipart(form).without_auth())
            .await
    }

    /// Synthesize speech. Sent without the bearer token; the raw audio comes
    /// back wrapped in an `AudioClip`.
    pub async fn tts(&self, text: &str, voice: Option<&str>) -> Result<AudioClip, ApiError> {
        let mut form = Form::new().text("text", text.to_string());
        if let Some(voice) = voice {
            form = form.text("voice", voice.to_string());
        }
        let response = self
            .send(ApiRequest::post(TTS_PATH).multipart(form).without_auth())
            .await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = response.bytes().await.map_err(ApiError::from_body)?;
        Ok(AudioClip::new(content_type.as_deref(), bytes.to_vec()))
    }
}

fn file_part(bytes: Vec<u8>, file_name: String, mime_type: &str) -> Result<Part, ApiError> {
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_type)
        .map_err(|e| ApiError::Other(format!("Invalid MIME type {}: {}", mime_type, e)))
}
