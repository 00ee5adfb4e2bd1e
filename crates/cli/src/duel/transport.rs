// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the duel connection.
//!
//! A connection is split into a sending half and a receiving half so the
//! session can keep sending while a background task reads. Both halves carry
//! raw text frames; framing lives above this layer.

use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by transport methods.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = TransportResult<T>> + Send + 'a>>;

/// Sending half of a connection.
pub trait FrameSink: Send {
    /// Sends one text message.
    fn send(&mut self, text: String) -> TransportFuture<'_, ()>;

    /// Closes the connection. Closing twice is not an error.
    fn close(&mut self) -> TransportFuture<'_, ()>;
}

/// Receiving half of a connection.
pub trait FrameSource: Send {
    /// Receives the next text message.
    ///
    /// Returns `None` once the peer has closed the connection.
    fn recv(&mut self) -> TransportFuture<'_, Option<String>>;
}

/// An open connection.
pub struct Connection {
    pub sink: Box<dyn FrameSink>,
    pub source: Box<dyn FrameSource>,
}

/// Opens connections.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations.
pub trait Transport: Send + Sync {
    fn connect(&self, url: &str) -> TransportFuture<'_, Connection>;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport implementation using tokio-tungstenite.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

impl WebSocketTransport {
    pub fn new() -> Self {
        WebSocketTransport
    }
}

impl Transport for WebSocketTransport {
    fn connect(&self, url: &str) -> TransportFuture<'_, Connection> {
        let url = url.to_string();
        Box::pin(async move {
            let (ws_stream, _) = tokio_tungstenite::connect_async(&url)
                .await
                .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
            debug!(url = %url, "websocket connected");

            let (sink, stream) = ws_stream.split();
            Ok(Connection {
                sink: Box::new(WebSocketSink { sink: Some(sink) }),
                source: Box::new(WebSocketSource { stream }),
            })
        })
    }
}

struct WebSocketSink {
    sink: Option<SplitSink<WsStream, Message>>,
}

impl FrameSink for WebSocketSink {
    fn send(&mut self, text: String) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let sink = self.sink.as_mut().ok_or(TransportError::ConnectionClosed)?;

            if let Err(e) = sink.send(Message::Text(text.into())).await {
                self.sink = None;
                return Err(TransportError::SendFailed(e.to_string()));
            }
            Ok(())
        })
    }

    fn close(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            if let Some(mut sink) = self.sink.take() {
                if let Err(e) = sink.close().await {
                    debug!(error = %e, "websocket close failed");
                }
            }
            Ok(())
        })
    }
}

struct WebSocketSource {
    stream: SplitStream<WsStream>,
}

impl FrameSource for WebSocketSource {
    fn recv(&mut self) -> TransportFuture<'_, Option<String>> {
        Box::pin(async move {
            loop {
                match self.stream.next().await {
                    Some(Ok(Message::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                    Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => return Ok(Some(text)),
                        Err(_) => {
                            warn!(len = bytes.len(), "ignoring non-UTF-8 binary message");
                            continue;
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => return Ok(None),
                    // Ping/pong are answered by tungstenite itself
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(TransportError::ReceiveFailed(e.to_string())),
                }
            }
        })
    }
}
