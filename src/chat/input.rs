use std::io;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("end of input")]
    Eof,

    #[error("interrupted")]
    Interrupted,

    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}

/// Yields the next line typed by the user, without the line ending.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Interactive line source with editing and in-memory history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, InputError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                    tracing::debug!("Failed to record history entry: {}", e);
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted) => Err(InputError::Interrupted),
            Err(ReadlineError::Eof) => Err(InputError::Eof),
            Err(err) => Err(InputError::Readline(err)),
        }
    }
}
