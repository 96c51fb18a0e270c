use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// A user-visible progress or error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub message: String,
    pub is_error: bool,
}

impl StatusUpdate {
    pub fn new(message: impl Into<String>, is_error: bool) -> Self {
        Self {
            message: message.into(),
            is_error,
        }
    }
}

/// Receives status notifications while a translation runs
pub trait StatusSink: Send + Sync {
    fn report(&self, message: &str, is_error: bool);
}

/// Writes status messages to the log only
pub struct LoggingStatusSink;

impl StatusSink for LoggingStatusSink {
    fn report(&self, message: &str, is_error: bool) {
        if is_error {
            warn!("Translation status: {}", message);
        } else {
            info!("Translation status: {}", message);
        }
    }
}

/// Forwards status messages to a connection task
pub struct ChannelStatusSink {
    sender: UnboundedSender<StatusUpdate>,
}

impl ChannelStatusSink {
    pub fn new(sender: UnboundedSender<StatusUpdate>) -> Self {
        Self { sender }
    }
}

impl StatusSink for ChannelStatusSink {
    fn report(&self, message: &str, is_error: bool) {
        // Receiver is gone once the client disconnected
        let _ = self.sender.send(StatusUpdate::new(message, is_error));
    }
}
