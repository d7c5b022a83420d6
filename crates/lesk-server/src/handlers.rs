use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lesk_core::{DisambiguationError, Lexicon, Outcome, Tagger, disambiguate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub tagger: Arc<dyn Tagger>,
    pub lexicon: Arc<dyn Lexicon>,
}

#[derive(Deserialize)]
pub struct PredictRequest {
    pub sentence: Option<String>,
    pub target_word: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    SenseSelected,
    UndeterminedSense,
    NoSensesFound,
    TargetNotFound,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub outcome: OutcomeKind,
    pub sense: String,
    pub sense_id: Option<String>,
}

const TARGET_NOT_FOUND: &str = "Target word not found in the sentence.";
const NO_SENSES_FOUND: &str = "No senses found for the target word in WordNet.";
const UNDETERMINED_SENSE: &str = "Unable to determine the sense.";

impl From<Result<Outcome, DisambiguationError>> for PredictResponse {
    fn from(result: Result<Outcome, DisambiguationError>) -> Self {
        let (outcome, sense, sense_id) = match result {
            Ok(Outcome::SenseSelected {
                sense_id,
                definition,
            }) => (OutcomeKind::SenseSelected, definition, Some(sense_id)),
            Ok(Outcome::UndeterminedSense) => {
                (OutcomeKind::UndeterminedSense, UNDETERMINED_SENSE.to_string(), None)
            }
            Ok(Outcome::NoSensesFound) => {
                (OutcomeKind::NoSensesFound, NO_SENSES_FOUND.to_string(), None)
            }
            Err(DisambiguationError::TargetNotFound { .. }) => {
                (OutcomeKind::TargetNotFound, TARGET_NOT_FOUND.to_string(), None)
            }
        };
        PredictResponse {
            outcome,
            sense,
            sense_id,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/robots.txt", get(robots))
        .route("/healthz", get(healthz))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn robots() -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=86400, immutable"),
            ),
        ],
        "User-agent: *\nDisallow: /",
    )
        .into_response()
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let sentence = request
        .sentence
        .ok_or_else(|| ApiError::bad_request("sentence is required"))?;
    let target_word = request
        .target_word
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("target_word is required"))?;

    let result = tokio::task::spawn_blocking(move || {
        let result = disambiguate(
            state.tagger.as_ref(),
            state.lexicon.as_ref(),
            &sentence,
            &target_word,
        );
        (target_word, result)
    })
    .await;
    let (target_word, result) = result.map_err(|e| {
        error!("disambiguation task failed: {e}");
        ApiError::Internal
    })?;

    let response = PredictResponse::from(result);
    info!(
        word = %target_word,
        outcome = ?response.outcome,
        sense_id = response.sense_id.as_deref().unwrap_or("-"),
        "predict"
    );
    Ok(Json(response))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
