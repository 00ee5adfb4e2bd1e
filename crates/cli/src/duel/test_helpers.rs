// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Channel-backed transport for duel tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flash_core::{Credentials, Frame};
use tokio::sync::{mpsc, watch};

use super::transport::{
    Connection, FrameSink, FrameSource, Transport, TransportError, TransportFuture,
};
use super::{DuelSession, DuelSnapshot};
use crate::secrets::MemorySecretStore;
use crate::session::Session;

type Inbound = mpsc::UnboundedSender<Result<String, TransportError>>;

#[derive(Default)]
struct Shared {
    sent: Mutex<Vec<String>>,
    inbound: Mutex<Option<Inbound>>,
    closed: AtomicBool,
    connects: AtomicUsize,
    refuse_connect: AtomicBool,
    /// Sends beyond this many fail.
    send_budget: Mutex<Option<usize>>,
}

/// Transport whose peer is driven by a [`MockPeer`].
#[derive(Clone, Default)]
pub struct MockTransport {
    shared: Arc<Shared>,
}

/// The test's end of a [`MockTransport`].
#[derive(Clone)]
pub struct MockPeer {
    shared: Arc<Shared>,
}

impl MockTransport {
    pub fn new() -> (MockTransport, MockPeer) {
        let transport = MockTransport::default();
        let peer = MockPeer {
            shared: Arc::clone(&transport.shared),
        };
        (transport, peer)
    }
}

impl Transport for MockTransport {
    fn connect(&self, _url: &str) -> TransportFuture<'_, Connection> {
        Box::pin(async move {
            if self.shared.refuse_connect.load(Ordering::SeqCst) {
                return Err(TransportError::ConnectionFailed("refused".into()));
            }
            self.shared.connects.fetch_add(1, Ordering::SeqCst);
            self.shared.closed.store(false, Ordering::SeqCst);

            let (tx, rx) = mpsc::unbounded_channel();
            *self.shared.inbound.lock().unwrap() = Some(tx);
            Ok(Connection {
                sink: Box::new(MockSink {
                    shared: Arc::clone(&self.shared),
                }),
                source: Box::new(MockSource { rx }),
            })
        })
    }
}

struct MockSink {
    shared: Arc<Shared>,
}

impl FrameSink for MockSink {
    fn send(&mut self, text: String) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            if self.shared.closed.load(Ordering::SeqCst) {
                return Err(TransportError::ConnectionClosed);
            }
            let mut budget = self.shared.send_budget.lock().unwrap();
            if let Some(left) = budget.as_mut() {
                if *left == 0 {
                    return Err(TransportError::SendFailed("broken pipe".into()));
                }
                *left -= 1;
            }
            self.shared.sent.lock().unwrap().push(text);
            Ok(())
        })
    }

    fn close(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            self.shared.closed.store(true, Ordering::SeqCst);
            Ok(())
        })
    }
}

struct MockSource {
    rx: mpsc::UnboundedReceiver<Result<String, TransportError>>,
}

impl FrameSource for MockSource {
    fn recv(&mut self) -> TransportFuture<'_, Option<String>> {
        Box::pin(async move {
            match self.rx.recv().await {
                Some(Ok(text)) => Ok(Some(text)),
                Some(Err(e)) => Err(e),
                None => Ok(None),
            }
        })
    }
}

impl MockPeer {
    /// Everything the client sent, decoded.
    pub fn sent_frames(&self) -> Vec<Frame> {
        self.shared
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|text| Frame::decode(text).unwrap())
            .collect()
    }

    pub fn sent_raw(&self) -> Vec<String> {
        self.shared.sent.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.shared.connects.load(Ordering::SeqCst)
    }

    pub fn refuse_connections(&self) {
        self.shared.refuse_connect.store(true, Ordering::SeqCst);
    }

    /// Lets `n` more sends through, then fails the rest.
    pub fn fail_sends_after(&self, n: usize) {
        *self.shared.send_budget.lock().unwrap() = Some(n);
    }

    /// Delivers raw text to the client.
    pub fn push_raw(&self, text: &str) {
        let inbound = self.shared.inbound.lock().unwrap();
        inbound
            .as_ref()
            .expect("not connected")
            .send(Ok(text.to_string()))
            .unwrap();
    }

    /// Delivers a MESSAGE frame carrying `json`.
    pub fn push_message(&self, json: &str) {
        let frame = Frame::new("MESSAGE")
            .with_header("destination", "/user/topic/duel")
            .with_header("subscription", "sub-0")
            .with_header("content-type", "application/json")
            .with_body(json);
        self.push_raw(&frame.encode());
    }

    /// Closes the connection from the server side.
    pub fn hang_up(&self) {
        self.shared.inbound.lock().unwrap().take();
    }

    pub fn fail_receive(&self) {
        let inbound = self.shared.inbound.lock().unwrap();
        inbound
            .as_ref()
            .expect("not connected")
            .send(Err(TransportError::ReceiveFailed("reset by peer".into())))
            .unwrap();
    }
}

pub fn signed_in_session() -> Arc<Session> {
    let store = MemorySecretStore::with_credentials(&Credentials::new("tok-1", None));
    Arc::new(Session::new(Arc::new(store)))
}

pub fn duel_with(transport: MockTransport, auth: Arc<Session>) -> DuelSession<MockTransport> {
    DuelSession::with_transport(transport, "ws://duel.test/ws-duel", (10_000, 10_000), auth)
}

/// Waits until the snapshot satisfies `pred`.
pub async fn wait_for(
    rx: &mut watch::Receiver<DuelSnapshot>,
    pred: impl FnMut(&DuelSnapshot) -> bool,
) -> DuelSnapshot {
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(pred))
        .await
        .expect("timed out waiting for duel state")
        .expect("duel session dropped")
        .clone()
}
