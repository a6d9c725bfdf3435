//! The interactive question/answer loop.
pub mod input;
pub mod output;
pub mod spinner;

pub use input::*;
pub use output::*;
pub use spinner::*;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::{ChatError, DEFAULT_MODEL};
use crate::openai::{Transcript, Transport, TransportError, USER_ROLE, build_request};

pub const BANNER: &str = "enter your question, and type ENTER\n";
pub const PROMPT: &str = "> ";

const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// One chat session: owns the transcript and drives the
/// read → request → print cycle until the input runs dry, something
/// fails, or the session is cancelled.
pub struct Conversation<T, L> {
    transport: T,
    input: L,
    output: Output,
    cancel: CancellationToken,
    model: String,
    tick: Duration,
    transcript: Transcript,
}

impl<T: Transport, L: LineSource> Conversation<T, L> {
    pub fn new(transport: T, input: L, output: Output) -> Self {
        Self {
            transport,
            input,
            output,
            cancel: CancellationToken::new(),
            model: DEFAULT_MODEL.to_string(),
            tick: DEFAULT_TICK,
            transcript: Transcript::new(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_spinner_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Runs the session. Returns `Ok(())` only when cancelled; every
    /// other way out is an error.
    pub async fn run(&mut self, api_key: Option<&str>) -> Result<(), ChatError> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ChatError::KeyNotSet),
        };

        self.output.print(BANNER);

        loop {
            if self.cancel.is_cancelled() {
                tracing::debug!("Conversation cancelled");
                return Ok(());
            }

            let line = match self.input.read_line(PROMPT) {
                Ok(line) => line,
                // Ctrl-C at the prompt is the user asking to leave
                Err(InputError::Interrupted) => {
                    self.cancel.cancel();
                    continue;
                }
                Err(err) => return Err(ChatError::InvalidInput(err)),
            };

            let body = build_request(&mut self.transcript, &self.model, USER_ROLE, &line)?;

            tracing::debug!(
                "Sending {} messages to {}",
                self.transcript.len(),
                self.model
            );
            let spinner = Spinner::start(self.output.clone(), self.tick, self.cancel.child_token());
            let result = self.transport.send(body, api_key).await;
            spinner.stop().await;

            let completion = result?;
            let reply = completion.reply().ok_or(TransportError::NoChoices)?;

            self.output.print(&format!("{}\n\n", reply.content));

            // The user already has the answer so losing it from the
            // history is not worth ending the session over
            if let Err(e) =
                build_request(&mut self.transcript, &self.model, &reply.role, &reply.content)
            {
                eprintln!("couldn't update conversation: {}", e);
            }
        }
    }
}
