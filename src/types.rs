use crate::timestamp::{current_time, format_clock_time, next_message_id};
use serde::{Deserialize, Deserializer, Serialize};

/// The single agent this console talks to.
pub const AGENT_ID: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Backend-supplied annotations on a reply. Only the escalation flag is read;
/// everything else in the payload is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMetadata {
    #[serde(default, deserialize_with = "null_as_false")]
    pub requires_human: bool,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// One bubble in the chat transcript. Lives only for the session.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
    pub metadata: Option<ChatMetadata>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: next_message_id(),
            text: text.into(),
            sender: Sender::User,
            timestamp: format_clock_time(current_time()),
            metadata: None,
        }
    }

    pub fn bot(reply: ChatReply) -> Self {
        Self {
            id: next_message_id(),
            text: reply.response,
            sender: Sender::Bot,
            timestamp: format_clock_time(current_time()),
            metadata: reply.metadata,
        }
    }

    pub fn requires_human(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|metadata| metadata.requires_human)
    }
}

/// Body of `POST /chat/`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub agent_id: u32,
}

/// Reply from `POST /chat/`. The backend schema calls the metadata field
/// `metadata_info`; both spellings are accepted, `metadata` winning if a reply
/// carries both.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "WireChatReply")]
pub struct ChatReply {
    pub response: String,
    pub metadata: Option<ChatMetadata>,
}

#[derive(Deserialize)]
struct WireChatReply {
    response: String,
    #[serde(default)]
    metadata: Option<ChatMetadata>,
    #[serde(default)]
    metadata_info: Option<ChatMetadata>,
}

impl From<WireChatReply> for ChatReply {
    fn from(wire: WireChatReply) -> Self {
        Self {
            response: wire.response,
            metadata: wire.metadata.or(wire.metadata_info),
        }
    }
}

/// One stored exchange from `GET /chat/history/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    #[serde(default)]
    pub agent_id: Option<i64>,
    pub message: String,
    pub response: String,
    pub created_at: String,
    #[serde(default)]
    pub metadata_info: Option<ChatMetadata>,
}

impl HistoryRecord {
    pub fn requires_human(&self) -> bool {
        self.metadata_info
            .as_ref()
            .is_some_and(|metadata| metadata.requires_human)
    }
}
