use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::chat::{Conversation, EditorSource, Output};
use crate::core::{AppConfig, ChatError};
use crate::openai::OpenAiClient;

/// Starts an interactive chat session on the terminal.
pub async fn run(config: &AppConfig, cancel: CancellationToken) -> Result<()> {
    // Check the key before touching the terminal
    let Some(api_key) = config.openai_api_key.as_deref() else {
        return Err(ChatError::KeyNotSet.into());
    };

    let input = EditorSource::new().map_err(ChatError::InvalidInput)?;
    let transport = OpenAiClient::new(&config.openai_api_hostname);

    let mut conversation = Conversation::new(transport, input, Output::stdout())
        .with_model(&config.openai_model)
        .with_spinner_tick(config.spinner_tick)
        .with_cancellation(cancel);

    conversation.run(Some(api_key)).await?;

    Ok(())
}
