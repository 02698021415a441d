use crossbeam_channel::Sender;
use menuki_protocol::{Notice, NoticeKind};
use tracing::info;

use crate::{Error, Result};

/// Sends diagnostic notices to the surrounding application.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: Sender<Notice>,
}

impl NotificationDispatcher {
    /// Create a new dispatcher from a notice channel.
    pub fn new(tx: Sender<Notice>) -> Self {
        Self { tx }
    }

    /// Send a notice with the given kind, title, and text.
    pub fn send_notice(&self, kind: NoticeKind, title: String, text: String) -> Result<()> {
        // Always log notices at info level regardless of urgency, including
        // kind, title and full text for traceability.
        info!(kind = ?kind, title = %title, text = %text, "notice");
        self.tx
            .send(Notice { kind, title, text })
            .map_err(|_| Error::ChannelClosed)
    }

    /// Convenience helper to send an error notice.
    pub fn send_error(&self, title: &str, text: String) -> Result<()> {
        self.send_notice(NoticeKind::Error, title.to_string(), text)
    }
}
