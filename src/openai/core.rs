use serde::{Deserialize, Serialize};

use crate::core::ChatError;

/// Role used for turns typed in by the person at the terminal.
pub const USER_ROLE: &str = "user";

/// A single role-tagged utterance. The role is whatever the caller or
/// the remote service says it is, it is never validated.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: &str, content: &str) -> Self {
        Message {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

/// Ordered, append-only conversation history. Every request carries
/// the whole thing.
#[derive(Clone, Serialize, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: &str, content: &str) {
        self.messages.push(Message::new(role, content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// Field order here is the field order on the wire.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a Transcript,
}

/// Appends `{role, content}` to the transcript and serializes the
/// request body for the whole transcript. The append happens even if
/// serialization fails.
pub fn build_request(
    transcript: &mut Transcript,
    model: &str,
    role: &str,
    content: &str,
) -> Result<Vec<u8>, ChatError> {
    transcript.append(role, content);
    let request = ChatRequest {
        model,
        messages: transcript,
    };
    serde_json::to_vec(&request).map_err(ChatError::InvalidPayload)
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Choice {
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: u32,
}

// {
//     "id": "chatcmpl-123",
//     "object": "chat.completion",
//     "model": "gpt-4-turbo",
//     "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21},
//     "choices": [{
//         "message": {"role": "assistant", "content": "Hello!"},
//         "finish_reason": "stop",
//         "index": 0
//     }]
// }
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub usage: Usage,
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// The only part of a completion the chat loop cares about.
    pub fn reply(&self) -> Option<&Message> {
        self.choices.first().map(|c| &c.message)
    }
}
