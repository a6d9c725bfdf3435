use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared handle to the terminal (or whatever stands in for it). The
/// chat loop and the spinner both print through clones of the same
/// `Output`, one chunk at a time.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes and flushes `text`. Failures are logged and dropped.
    pub fn print(&self, text: &str) {
        let Ok(mut writer) = self.inner.lock() else {
            tracing::debug!("Output lock poisoned, dropping {:?}", text);
            return;
        };
        if let Err(e) = writer.write_all(text.as_bytes()).and_then(|_| writer.flush()) {
            tracing::debug!("Failed to write output: {}", e);
        }
    }
}
