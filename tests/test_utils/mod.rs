//! Test doubles for driving a `Conversation` without a terminal or
//! network.
#![allow(dead_code)]
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use askgpt::chat::{InputError, LineSource, Output};
use askgpt::openai::{
    Choice, CompletionResponse, Message, OpenAiClient, Transport, TransportError, Usage,
};

/// Marker written to the output every time the scripted input is read.
pub const READ_MARKER: &str = "<read>";

/// Every chunk written to an `Output`, in order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn output(&self) -> Output {
        Output::new(self.clone())
    }

    pub fn chunks(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(buf).to_string());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hands out a fixed list of lines, then reports end of input.
pub struct ScriptedInput {
    lines: VecDeque<String>,
    reads: Arc<AtomicUsize>,
    output: Option<Output>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            reads: Arc::new(AtomicUsize::new(0)),
            output: None,
        }
    }

    /// Also write `READ_MARKER` to `output` on every read.
    pub fn marking(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    pub fn reads(&self) -> Arc<AtomicUsize> {
        self.reads.clone()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, InputError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(output) = &self.output {
            output.print(READ_MARKER);
        }
        self.lines.pop_front().ok_or(InputError::Eof)
    }
}

/// Reads questions from any buffered reader, echoing the prompt to
/// `output` the way a terminal would show it.
pub struct ReaderInput<R> {
    reader: R,
    output: Output,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R, output: Output) -> Self {
        Self { reader, output }
    }
}

impl<R: BufRead> LineSource for ReaderInput<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        self.output.print(prompt);
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Eof);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Base URL of a local port nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a local port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn completion(role: &str, content: &str) -> CompletionResponse {
    CompletionResponse {
        id: String::from("fake-id"),
        object: String::from("fake-object"),
        model: String::from("fake-model"),
        usage: Usage::default(),
        choices: vec![Choice {
            message: Message::new(role, content),
            finish_reason: Some(String::from("done")),
            index: 1,
        }],
    }
}

/// Replies to every request with the same message and keeps a copy of
/// each request body it was sent.
#[derive(Clone)]
pub struct FixedReply {
    reply: CompletionResponse,
    delay: Duration,
    pub requests: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl FixedReply {
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            reply: completion(role, content),
            delay: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sent(&self) -> Vec<serde_json::Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FixedReply {
    async fn send(
        &self,
        body: Vec<u8>,
        _api_key: &str,
    ) -> Result<CompletionResponse, TransportError> {
        let json = serde_json::from_slice(&body).expect("request body should be JSON");
        self.requests.lock().unwrap().push(json);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.reply.clone())
    }
}

/// Fails every request the way a garbled response body would.
pub struct Garbled {
    pub calls: Arc<AtomicUsize>,
}

impl Garbled {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Transport for Garbled {
    async fn send(
        &self,
        _body: Vec<u8>,
        _api_key: &str,
    ) -> Result<CompletionResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let err = serde_json::from_str::<CompletionResponse>("{\n\t\"this\":\n}").unwrap_err();
        Err(TransportError::Decode(err))
    }
}

/// Returns a completion with nothing in `choices`.
pub struct NoChoices;

#[async_trait]
impl Transport for NoChoices {
    async fn send(
        &self,
        _body: Vec<u8>,
        _api_key: &str,
    ) -> Result<CompletionResponse, TransportError> {
        let mut resp = completion("assistant", "unused");
        resp.choices.clear();
        Ok(resp)
    }
}

/// Fails every request at the connection level by pointing a real
/// client at a closed port.
pub struct Refused {
    client: OpenAiClient,
    pub calls: Arc<AtomicUsize>,
}

impl Refused {
    pub fn new() -> Self {
        Self {
            client: OpenAiClient::new(&closed_port_url()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Transport for Refused {
    async fn send(
        &self,
        body: Vec<u8>,
        api_key: &str,
    ) -> Result<CompletionResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.client.send(body, api_key).await
    }
}
