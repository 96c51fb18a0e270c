//! Test doubles for the translation backend and status sink

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::interface::{RemoteError, TranslationBackend};
use super::status::{StatusSink, StatusUpdate};

type Reply = fn() -> Result<String, RemoteError>;

/// Backend answering every call with the same canned reply
pub struct FakeBackend {
    reply: Reply,
    pub calls: AtomicUsize,
    pub log: Mutex<Vec<(String, Option<String>, String)>>,
}

impl FakeBackend {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TranslationBackend for FakeBackend {
    async fn call(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push((
            text.to_string(),
            source_lang.map(String::from),
            target_lang.to_string(),
        ));
        (self.reply)()
    }

    fn has_credential(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct RecordingStatusSink {
    updates: Mutex<Vec<StatusUpdate>>,
}

impl RecordingStatusSink {
    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingStatusSink {
    fn report(&self, message: &str, is_error: bool) {
        self.updates
            .lock()
            .unwrap()
            .push(StatusUpdate::new(message, is_error));
    }
}
