// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text frame codec for the duel transport.
//!
//! A frame is a command line, zero or more `key:value` header lines, a blank
//! line, an optional body and a single NUL terminator:
//!
//! ```text
//! SEND
//! destination:/app/duel.progress
//! content-type:application/json
//!
//! {"progress":0.4}\0
//! ```
//!
//! Only the subset the duel protocol uses is supported: header values are not
//! escaped and bodies are delimited by the terminator rather than a
//! `content-length` header.

use serde::Serialize;
use thiserror::Error;

/// Byte that terminates every serialized frame.
pub const TERMINATOR: char = '\0';

/// Outbound handshake command.
pub const CONNECT: &str = "CONNECT";
/// Server acknowledgement of a handshake.
pub const CONNECTED: &str = "CONNECTED";
/// Outbound subscription command.
pub const SUBSCRIBE: &str = "SUBSCRIBE";
/// Outbound application message command.
pub const SEND: &str = "SEND";
/// Inbound application message command.
pub const MESSAGE: &str = "MESSAGE";
/// Inbound protocol error command.
pub const ERROR: &str = "ERROR";

/// Protocol versions offered in the handshake.
pub const ACCEPT_VERSION: &str = "1.1,1.2";

/// Errors produced while decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The input held nothing but heart-beats or a terminator.
    #[error("empty frame")]
    Empty,

    /// The first line carried no command.
    #[error("missing command line")]
    MissingCommand,

    /// A header line had no `:` separator.
    #[error("header line without ':' separator: {0:?}")]
    MalformedHeader(String),
}

/// A single protocol frame.
///
/// Header keys are unique; insertion order is preserved for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    command: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl Frame {
    /// Creates a frame with no headers and no body.
    pub fn new(command: impl Into<String>) -> Self {
        Frame {
            command: command.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets a header, replacing the value in place if the key already exists.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the body. An empty body is the same as no body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// Handshake frame carrying the bearer credential.
    ///
    /// `heart_beat` is `(outgoing_ms, incoming_ms)`.
    pub fn connect(token: &str, heart_beat: (u64, u64)) -> Self {
        Frame::new(CONNECT)
            .with_header("accept-version", ACCEPT_VERSION)
            .with_header("heart-beat", format!("{},{}", heart_beat.0, heart_beat.1))
            .with_header("Authorization", format!("Bearer {}", token))
    }

    /// Subscription to a destination under the given subscription id.
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Frame::new(SUBSCRIBE)
            .with_header("id", id)
            .with_header("destination", destination)
    }

    /// Application message to a destination, without a body.
    pub fn send(destination: &str) -> Self {
        Frame::new(SEND).with_header("destination", destination)
    }

    /// Application message to a destination with a JSON body.
    pub fn send_json<T: Serialize>(destination: &str, payload: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(payload)?;
        Ok(Frame::send(destination)
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Looks up a header value by exact key.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// True for inbound application messages.
    pub fn is_message(&self) -> bool {
        self.command == MESSAGE
    }

    /// Serializes the frame, terminator included.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(
            self.command.len() + self.body.as_ref().map_or(0, String::len) + 32,
        );
        out.push_str(&self.command);
        out.push('\n');
        for (key, value) in &self.headers {
            out.push_str(key);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
        if let Some(body) = &self.body {
            out.push_str(body);
        }
        out.push(TERMINATOR);
        out
    }

    /// Parses one frame from a transport message.
    ///
    /// Leading heart-beat EOLs are skipped and anything after the first
    /// terminator is discarded. When a header repeats, the first value wins.
    pub fn decode(text: &str) -> Result<Frame, FrameError> {
        let text = text.trim_start_matches(['\r', '\n']);
        let text = match text.find(TERMINATOR) {
            Some(end) => &text[..end],
            None => text,
        };
        if text.trim().is_empty() {
            return Err(FrameError::Empty);
        }

        let (head, body) = split_head_body(text);
        let mut lines = head
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        let command = lines
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(FrameError::MissingCommand)?;

        let mut frame = Frame::new(command);
        for line in lines.filter(|l| !l.is_empty()) {
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| FrameError::MalformedHeader(line.to_string()))?;
            if frame.header(key).is_none() {
                frame.headers.push((key.to_string(), value.to_string()));
            }
        }

        frame.body = body.filter(|b| !b.is_empty()).map(str::to_string);
        Ok(frame)
    }
}

/// Splits at the first blank line, accepting both LF and CRLF line endings.
fn split_head_body(text: &str) -> (&str, Option<&str>) {
    let lf = text.find("\n\n").map(|at| (at, at + 2));
    let crlf = text.find("\r\n\r\n").map(|at| (at, at + 4));
    let split = match (lf, crlf) {
        (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
        (a, b) => a.or(b),
    };
    match split {
        Some((end, start)) => (&text[..end], Some(&text[start..])),
        None => (text, None),
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
