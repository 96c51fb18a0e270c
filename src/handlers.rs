use serde_json::{json, Value};
use tracing::{debug, warn};
use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt};
use tokio::sync::mpsc;

use crate::state::{AppState, WidgetSession};
use crate::translate::validation::character_count;
use crate::translate::{ChannelStatusSink, StatusUpdate, TranslationRequest};

pub async fn handle_message<S>(
    state: &AppState,
    client_uid: &str,
    text: &str,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let msg: Value = serde_json::from_str(text)?;
    let msg_type = msg.get("type").and_then(|v| v.as_str());

    match msg_type {
        Some("set-languages") => {
            handle_set_languages(state, client_uid, &msg, sender).await?;
        }
        Some("set-text") => {
            handle_set_text(state, client_uid, &msg, sender).await?;
        }
        Some("translate") => {
            handle_translate(state, client_uid, &msg, sender).await?;
        }
        Some("swap-languages") => {
            handle_swap_languages(state, client_uid, sender).await?;
        }
        _ => {
            warn!("Unknown message type: {:?}", msg_type);
        }
    }

    Ok(())
}

async fn send_json<S>(sender: &mut S, value: Value) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    sender.send(Message::Text(value.to_string())).await?;
    Ok(())
}

async fn send_status<S>(sender: &mut S, update: &StatusUpdate) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    send_json(
        sender,
        json!({
            "type": "translation-status",
            "message": update.message,
            "is_error": update.is_error
        }),
    )
    .await
}

fn update_session<R>(
    state: &AppState,
    client_uid: &str,
    f: impl FnOnce(&mut WidgetSession) -> R,
) -> R {
    let mut session = state.sessions.entry(client_uid.to_string()).or_default();
    f(session.value_mut())
}

async fn send_session<S>(sender: &mut S, session: WidgetSession) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    send_json(
        sender,
        json!({
            "type": "session-update",
            "session": session
        }),
    )
    .await
}

async fn handle_set_languages<S>(
    state: &AppState,
    client_uid: &str,
    msg: &Value,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let source = msg.get("source_lang").and_then(|v| v.as_str());
    let target = msg.get("target_lang").and_then(|v| v.as_str());

    let session = update_session(state, client_uid, |session| {
        if let Some(source) = source {
            session.source_lang = source.to_string();
        }
        if let Some(target) = target {
            session.target_lang = target.to_string();
        }
        session.clone()
    });

    send_session(sender, session).await
}

async fn handle_set_text<S>(
    state: &AppState,
    client_uid: &str,
    msg: &Value,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let text = msg.get("text").and_then(|v| v.as_str()).unwrap_or("");
    update_session(state, client_uid, |session| {
        session.source_text = text.to_string();
    });

    let count = character_count(text);
    send_json(
        sender,
        json!({
            "type": "character-count",
            "count": count.count,
            "max": count.max,
            "exceeds_limit": count.exceeds_limit
        }),
    )
    .await
}

async fn handle_translate<S>(
    state: &AppState,
    client_uid: &str,
    msg: &Value,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let text = msg.get("text").and_then(|v| v.as_str());
    let source = msg.get("source_lang").and_then(|v| v.as_str());
    let target = msg.get("target_lang").and_then(|v| v.as_str());

    // Fields sent with the message replace what the session holds
    let session = update_session(state, client_uid, |session| {
        if let Some(text) = text {
            session.source_text = text.to_string();
        }
        if let Some(source) = source {
            session.source_lang = source.to_string();
        }
        if let Some(target) = target {
            session.target_lang = target.to_string();
        }
        session.clone()
    });

    let request = match TranslationRequest::new(
        &session.source_text,
        &session.source_lang,
        &session.target_lang,
    ) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejected translation request from {}: {}", client_uid, e);
            return send_status(sender, &StatusUpdate::new(e.to_string(), true)).await;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink = ChannelStatusSink::new(tx);
    let translation = state.orchestrator.translate(&request, &sink);
    tokio::pin!(translation);

    // Forward status messages while the remote call is in flight
    let result = loop {
        tokio::select! {
            Some(update) = rx.recv() => send_status(sender, &update).await?,
            result = &mut translation => break result,
        }
    };
    while let Ok(update) = rx.try_recv() {
        send_status(sender, &update).await?;
    }

    update_session(state, client_uid, |session| {
        session.translated_text = result.translated_text.clone();
    });

    send_json(
        sender,
        json!({
            "type": "translation-result",
            "translated_text": result.translated_text,
            "is_simulated": result.is_simulated
        }),
    )
    .await
}

async fn handle_swap_languages<S>(
    state: &AppState,
    client_uid: &str,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let session = update_session(state, client_uid, |session| {
        session.swap_languages();
        session.clone()
    });

    send_session(sender, session).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_manager::Config;
    use crate::translate::interface::RemoteError;
    use crate::translate::orchestrator::{STATUS_COMPLETE, STATUS_DEMO_COMPLETE, STATUS_IN_PROGRESS};
    use crate::translate::testing::FakeBackend;
    use crate::translate::TranslationOrchestrator;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    const CLIENT: &str = "client-1";

    fn state(backend: Arc<FakeBackend>) -> AppState {
        let orchestrator = TranslationOrchestrator::new(backend, Duration::ZERO);
        AppState::with_orchestrator(Config::default(), orchestrator)
    }

    async fn exchange(state: &AppState, msg: Value) -> Vec<Value> {
        let mut sent: Vec<Message> = Vec::new();
        handle_message(state, CLIENT, &msg.to_string(), &mut sent)
            .await
            .unwrap();
        sent.into_iter()
            .map(|m| match m {
                Message::Text(text) => serde_json::from_str(&text).unwrap(),
                other => panic!("unexpected message: {:?}", other),
            })
            .collect()
    }

    fn statuses(messages: &[Value]) -> Vec<(String, bool)> {
        messages
            .iter()
            .filter(|m| m["type"] == "translation-status")
            .map(|m| {
                (
                    m["message"].as_str().unwrap().to_string(),
                    m["is_error"].as_bool().unwrap(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn translate_streams_status_then_result() {
        let state = state(FakeBackend::new(|| Ok("Hola".to_string())));
        let sent = exchange(
            &state,
            json!({"type": "translate", "text": "Hello", "source_lang": "en", "target_lang": "es"}),
        )
        .await;

        assert_eq!(
            statuses(&sent),
            vec![
                (STATUS_IN_PROGRESS.to_string(), false),
                (STATUS_COMPLETE.to_string(), false),
            ]
        );
        let last = sent.last().unwrap();
        assert_eq!(last["type"], "translation-result");
        assert_eq!(last["translated_text"], "Hola");
        assert_eq!(last["is_simulated"], false);
        assert_eq!(state.sessions.get(CLIENT).unwrap().translated_text, "Hola");
    }

    #[tokio::test]
    async fn translate_failure_reports_error_and_demo_result() {
        let state = state(FakeBackend::new(|| Err(RemoteError::HttpStatus(502))));
        let sent = exchange(
            &state,
            json!({"type": "translate", "text": "abc", "source_lang": "en", "target_lang": "ja"}),
        )
        .await;

        let statuses = statuses(&sent);
        assert_eq!(statuses.len(), 3);
        assert!(statuses[1].1);
        assert_eq!(statuses[2], (STATUS_DEMO_COMPLETE.to_string(), false));

        let last = sent.last().unwrap();
        assert_eq!(last["is_simulated"], true);
        assert_eq!(
            last["translated_text"],
            "[Simulated translation from English to Japanese]\n\ncba"
        );
    }

    #[tokio::test]
    async fn invalid_request_reports_error_without_remote_call() {
        let backend = FakeBackend::new(|| Ok("unused".to_string()));
        let state = state(backend.clone());
        let sent = exchange(
            &state,
            json!({"type": "translate", "text": "   ", "target_lang": "es"}),
        )
        .await;

        assert_eq!(
            sent,
            vec![json!({
                "type": "translation-status",
                "message": "Please enter text to translate",
                "is_error": true
            })]
        );
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn translate_uses_session_selection() {
        let backend = FakeBackend::new(|| Ok("Bonjour".to_string()));
        let state = state(backend.clone());

        exchange(&state, json!({"type": "set-languages", "source_lang": "en", "target_lang": "fr"})).await;
        exchange(&state, json!({"type": "set-text", "text": "Hello"})).await;
        exchange(&state, json!({"type": "translate"})).await;

        let log = backend.log.lock().unwrap();
        assert_eq!(
            log[0],
            ("Hello".to_string(), Some("en".to_string()), "fr".to_string())
        );
    }

    #[tokio::test]
    async fn swap_after_translation_exchanges_text() {
        let state = state(FakeBackend::new(|| Ok("Hola".to_string())));
        exchange(
            &state,
            json!({"type": "translate", "text": "Hello", "source_lang": "en", "target_lang": "es"}),
        )
        .await;

        let sent = exchange(&state, json!({"type": "swap-languages"})).await;
        assert_eq!(
            sent[0]["session"],
            json!({
                "source_lang": "es",
                "target_lang": "en",
                "source_text": "Hola",
                "translated_text": "Hello"
            })
        );
    }

    #[tokio::test]
    async fn swap_from_auto_then_translate_rejects_auto_target() {
        let backend = FakeBackend::new(|| Err(RemoteError::HttpStatus(503)));
        let state = state(backend.clone());

        let sent = exchange(
            &state,
            json!({"type": "translate", "text": "Hello world", "source_lang": "auto", "target_lang": "es"}),
        )
        .await;
        assert_eq!(
            sent.last().unwrap()["translated_text"],
            "[Simulated translation from detected language to Spanish]\n\nhola mundo"
        );

        let sent = exchange(&state, json!({"type": "swap-languages"})).await;
        assert_eq!(sent[0]["session"]["source_lang"], "es");
        assert_eq!(sent[0]["session"]["target_lang"], "auto");
        assert_eq!(sent[0]["session"]["translated_text"], "Hello world");

        let sent = exchange(&state, json!({"type": "translate"})).await;
        assert_eq!(
            sent,
            vec![json!({
                "type": "translation-status",
                "message": "Please select a target language",
                "is_error": true
            })]
        );
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn set_text_reports_character_count() {
        let state = state(FakeBackend::new(|| Ok("unused".to_string())));
        let sent = exchange(&state, json!({"type": "set-text", "text": "x".repeat(5001)})).await;

        assert_eq!(sent[0]["type"], "character-count");
        assert_eq!(sent[0]["count"], 5001);
        assert_eq!(sent[0]["exceeds_limit"], true);
    }

    #[tokio::test]
    async fn unknown_messages_are_ignored() {
        let state = state(FakeBackend::new(|| Ok("unused".to_string())));
        let sent = exchange(&state, json!({"type": "mic-audio-data"})).await;
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let state = state(FakeBackend::new(|| Ok("unused".to_string())));
        let mut sent: Vec<Message> = Vec::new();
        assert!(handle_message(&state, CLIENT, "not json", &mut sent).await.is_err());
    }
}
