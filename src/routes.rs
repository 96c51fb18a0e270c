use axum::{
    extract::State,
    routing::{get, post},
    Router,
    Json,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::state::AppState;
use crate::translate::languages::{all_languages, Language};
use crate::translate::validation::{character_count, CharacterCount};
use crate::translate::{LoggingStatusSink, TranslationRequest, TranslationResult, AUTO_DETECT};

#[derive(Debug, Deserialize)]
pub struct TranslatePayload {
    pub text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    pub target_lang: String,
}

fn default_source_lang() -> String {
    AUTO_DETECT.to_string()
}

#[derive(Debug, Deserialize)]
pub struct CharacterCountPayload {
    pub text: String,
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // WebSocket
        .route("/client-ws", get(websocket_handler))

        // Health check
        .route("/api/health", get(health_check))

        // REST API routes
        .route("/api/languages", get(get_languages))
        .route("/api/translate", post(translate))
        .route("/api/character-count", post(count_characters))
}

async fn websocket_handler(
    ws: axum::extract::ws::WebSocketUpgrade,
    State(state): State<AppState>,
) -> axum::response::Response {
    crate::websocket::websocket_handler(ws, State(state)).await
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "conf_version": state.config.system_config.conf_version,
        "credential_configured": state.orchestrator.has_credential()
    }))
}

async fn get_languages() -> Json<Vec<Language>> {
    Json(all_languages())
}

async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslatePayload>,
) -> Result<Json<TranslationResult>, (StatusCode, Json<Value>)> {
    let request = TranslationRequest::new(&payload.text, &payload.source_lang, &payload.target_lang)
        .map_err(|e| {
            debug!("Rejected translation request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": e.to_string()})),
            )
        })?;

    let result = state.orchestrator.translate(&request, &LoggingStatusSink).await;
    Ok(Json(result))
}

async fn count_characters(Json(payload): Json<CharacterCountPayload>) -> Json<CharacterCount> {
    Json(character_count(&payload.text))
}
