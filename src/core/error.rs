use thiserror::Error;

use crate::chat::InputError;
use crate::openai::TransportError;

/// Failures that end a chat session. The messages are what the user
/// sees after `error: `.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("the OPENAI_API_KEY environment variable is not set")]
    KeyNotSet,

    #[error("couldn't scan user input")]
    InvalidInput(#[source] InputError),

    #[error("couldn't generate payload")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("couldn't fetch results")]
    NoResults(#[source] TransportError),
}

impl From<TransportError> for ChatError {
    fn from(err: TransportError) -> Self {
        ChatError::NoResults(err)
    }
}
