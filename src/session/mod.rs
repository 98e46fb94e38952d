use serde::{Deserialize, Serialize};

pub mod store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: u64,
    pub role: Role,
    /// What the visitor sent, or what the guide said aloud.
    pub text: String,
    /// The guide's reply as JSON, replayed to the guide as context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Part of a free-dialogue exchange: the request was sent from the chat
    /// screen. Navigation-only turns stay out of the chat transcript.
    #[serde(default)]
    pub dialogue: bool,
}

impl ConversationTurn {
    pub fn transcript_line(&self) -> String {
        match self.role {
            Role::User => format!("User: {}", self.text),
            Role::Assistant => format!("AI: {}", self.payload.as_deref().unwrap_or(&self.text)),
        }
    }
}
