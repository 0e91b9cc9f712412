//! Client notification wrapper.
//!
//! `ClientNotifier` wraps `tower_lsp_server::Client` so every handler reports
//! to the editor (`window/logMessage`) the same way.

use tower_lsp_server::Client;
use tower_lsp_server::ls_types::MessageType;

use crate::lsp::{SettingsEvent, SettingsEventKind};

/// LSP message severity for a settings event.
pub(crate) fn settings_event_message_type(kind: SettingsEventKind) -> MessageType {
    match kind {
        SettingsEventKind::Info => MessageType::INFO,
        SettingsEventKind::Warning => MessageType::WARNING,
    }
}

#[derive(Clone)]
pub(crate) struct ClientNotifier {
    client: Client,
}

impl std::fmt::Debug for ClientNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientNotifier")
            .field("client", &self.client)
            .finish()
    }
}

impl ClientNotifier {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Log a message to the client at the specified severity level.
    pub(crate) async fn log(&self, level: MessageType, message: impl Into<String>) {
        self.client.log_message(level, message.into()).await;
    }

    /// Log an informational message.
    pub(crate) async fn log_info(&self, message: impl Into<String>) {
        self.log(MessageType::INFO, message).await;
    }

    /// Log a warning message.
    pub(crate) async fn log_warning(&self, message: impl Into<String>) {
        self.log(MessageType::WARNING, message).await;
    }

    /// Forward settings events collected while loading configuration.
    pub(crate) async fn log_settings_events(&self, events: &[SettingsEvent]) {
        for event in events {
            self.log(settings_event_message_type(event.kind), event.message.clone())
                .await;
        }
    }
}
