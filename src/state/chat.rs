use crate::api::{AgentApi, ApiResult};
use crate::types::{ChatMessage, ChatReply};
use tracing::error;

pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Transcript, composer text and flags for the chat panel.
///
/// The transcript is append-only: messages are pushed and never edited.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatPanelState {
    messages: Vec<ChatMessage>,
    input: String,
    loading: bool,
    error: Option<String>,
}

/// A send that has been admitted and is waiting for the backend.
#[derive(Debug)]
#[must_use = "an admitted send must be delivered and finished"]
pub struct PendingSend {
    text: String,
}

impl PendingSend {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Post the message. Failures are logged here; the panel only shows the
    /// generic message.
    pub async fn deliver(self, api: &dyn AgentApi) -> ApiResult<ChatReply> {
        let outcome = api.send_chat(&self.text).await;
        if let Err(err) = &outcome {
            error!("Error sending message: {err}");
        }
        outcome
    }
}

impl ChatPanelState {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: String) {
        self.input = value;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the Send button is enabled.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Admit a send of `text`. Blank text or a send already in flight leaves the
    /// state untouched and returns `None`.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        if text.trim().is_empty() || self.loading {
            return None;
        }
        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.error = None;
        self.loading = true;
        Some(PendingSend {
            text: text.to_string(),
        })
    }

    /// Record the backend outcome. The user bubble stays either way.
    pub fn finish_send(&mut self, outcome: ApiResult<ChatReply>) {
        match outcome {
            Ok(reply) => self.messages.push(ChatMessage::bot(reply)),
            Err(_) => self.error = Some(SEND_FAILED_MESSAGE.to_string()),
        }
        self.loading = false;
    }
}
