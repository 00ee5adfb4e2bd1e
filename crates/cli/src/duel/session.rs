// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The duel state machine and its connection.

use std::sync::Arc;

use flash_core::duel::{
    DUEL_SUBSCRIPTION_ID, DUEL_TOPIC, JOIN_DESTINATION, PROGRESS_DESTINATION,
    QUIT_DESTINATION, REACTION_DESTINATION,
};
use flash_core::frame::{CONNECTED, ERROR, MESSAGE};
use flash_core::{DuelEnvelope, Frame, FrameError, ProgressUpdate, Reaction};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::state::{clamp_progress, DuelSnapshot, DuelState};
use super::transport::{Connection, FrameSink, FrameSource, Transport, WebSocketTransport};
use super::{DuelError, DuelResult};
use crate::session::Session;

/// Open connection plus the task reading from it.
struct Link {
    sink: Box<dyn FrameSink>,
    reader: JoinHandle<()>,
}

/// One player's side of a duel.
///
/// All methods take `&self`; outbound frames are serialized on an internal
/// lock so they leave in call order. State is published on a watch channel
/// (see [`subscribe`](Self::subscribe)). Dropping the session stops the
/// reader without sending a quit frame; call [`disconnect`](Self::disconnect)
/// to leave cleanly.
pub struct DuelSession<T: Transport = WebSocketTransport> {
    transport: T,
    url: String,
    heart_beat: (u64, u64),
    auth: Arc<Session>,
    snapshot: Arc<watch::Sender<DuelSnapshot>>,
    link: Mutex<Option<Link>>,
}

impl DuelSession<WebSocketTransport> {
    /// Creates a session that connects over WebSocket to `url`.
    pub fn new(url: impl Into<String>, heart_beat: (u64, u64), auth: Arc<Session>) -> Self {
        Self::with_transport(WebSocketTransport::new(), url, heart_beat, auth)
    }
}

impl<T: Transport> DuelSession<T> {
    pub fn with_transport(
        transport: T,
        url: impl Into<String>,
        heart_beat: (u64, u64),
        auth: Arc<Session>,
    ) -> Self {
        let (snapshot, _) = watch::channel(DuelSnapshot::default());
        DuelSession {
            transport,
            url: url.into(),
            heart_beat,
            auth,
            snapshot: Arc::new(snapshot),
            link: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> DuelState {
        self.snapshot.borrow().state
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watches every change to the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<DuelSnapshot> {
        self.snapshot.subscribe()
    }

    /// Connects, authenticates, subscribes to the duel topic and joins the
    /// matchmaking queue.
    ///
    /// Only valid from `Idle`. If any step fails the session stays `Idle`
    /// and the connection is closed.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn start_matchmaking(&self) -> DuelResult<()> {
        let mut link = self.link.lock().await;
        let state = self.state();
        if link.is_some() || state != DuelState::Idle {
            return Err(DuelError::AlreadyActive(state));
        }

        let token = self
            .auth
            .access_token()?
            .filter(|t| !t.is_empty())
            .ok_or(DuelError::NoCredential)?;

        let Connection { mut sink, source } = self.transport.connect(&self.url).await?;

        let handshake = [
            Frame::connect(&token, self.heart_beat),
            Frame::subscribe(DUEL_SUBSCRIPTION_ID, DUEL_TOPIC),
            Frame::send(JOIN_DESTINATION),
        ];
        for frame in &handshake {
            if let Err(e) = sink.send(frame.encode()).await {
                warn!(command = frame.command(), error = %e, "duel handshake failed");
                if let Err(e) = sink.close().await {
                    debug!(error = %e, "close after failed handshake");
                }
                return Err(e.into());
            }
        }

        self.snapshot.send_replace(DuelSnapshot {
            state: DuelState::Searching,
            connected: true,
            ..DuelSnapshot::default()
        });
        let reader = tokio::spawn(read_loop(source, Arc::clone(&self.snapshot)));
        *link = Some(Link { sink, reader });

        info!("searching for an opponent");
        Ok(())
    }

    /// Reports our progress to the opponent.
    ///
    /// Ignored unless matched. Values are clamped into `[0, 1]`. A failed
    /// send leaves the local progress unchanged.
    pub async fn update_progress(&self, value: f64) -> DuelResult<()> {
        let progress = clamp_progress(value).ok_or(DuelError::InvalidProgress(value))?;
        if self.state() != DuelState::Matched {
            debug!(state = %self.state(), "not matched, progress not sent");
            return Ok(());
        }

        let frame = Frame::send_json(PROGRESS_DESTINATION, &ProgressUpdate { progress })?;
        self.send_frame(frame).await?;
        self.snapshot.send_if_modified(|s| s.set_my_progress(progress));
        Ok(())
    }

    /// Sends a reaction to the opponent. Does not change local state.
    pub async fn send_reaction(&self, emoji: &str) -> DuelResult<()> {
        let frame = Frame::send_json(
            REACTION_DESTINATION,
            &Reaction {
                content: emoji.to_string(),
            },
        )?;
        self.send_frame(frame).await
    }

    /// Leaves the duel and resets to `Idle`.
    ///
    /// Safe from any state and idempotent. The quit frame is best-effort; the
    /// connection is closed and the reader stopped regardless.
    pub async fn disconnect(&self) {
        let mut guard = self.link.lock().await;
        if let Some(mut link) = guard.take() {
            if let Err(e) = link.sink.send(Frame::send(QUIT_DESTINATION).encode()).await {
                debug!(error = %e, "quit frame not sent");
            }
            if let Err(e) = link.sink.close().await {
                debug!(error = %e, "close failed");
            }
            link.reader.abort();
            // A cancelled reader reports a JoinError; nothing to do with it.
            let _ = link.reader.await;
            info!("left duel");
        }

        self.snapshot.send_if_modified(|s| {
            if *s == DuelSnapshot::default() {
                false
            } else {
                *s = DuelSnapshot::default();
                true
            }
        });
    }

    async fn send_frame(&self, frame: Frame) -> DuelResult<()> {
        let mut guard = self.link.lock().await;
        let link = guard.as_mut().ok_or(DuelError::NotConnected)?;
        if let Err(e) = link.sink.send(frame.encode()).await {
            warn!(destination = frame.header("destination"), error = %e, "duel send failed");
            return Err(e.into());
        }
        Ok(())
    }
}

impl<T: Transport> Drop for DuelSession<T> {
    fn drop(&mut self) {
        if let Some(link) = self.link.get_mut().take() {
            link.reader.abort();
        }
    }
}

/// Reads until the connection ends or fails, then clears `connected`.
/// Never reconnects.
async fn read_loop(mut source: Box<dyn FrameSource>, snapshot: Arc<watch::Sender<DuelSnapshot>>) {
    loop {
        match source.recv().await {
            Ok(Some(text)) => handle_inbound(&text, &snapshot),
            Ok(None) => {
                info!("duel connection closed by server");
                break;
            }
            Err(e) => {
                warn!(error = %e, "duel receive failed, reader stopped");
                break;
            }
        }
    }
    snapshot.send_if_modified(|s| std::mem::replace(&mut s.connected, false));
}

/// Applies one inbound transport message to the snapshot.
pub(crate) fn handle_inbound(text: &str, snapshot: &watch::Sender<DuelSnapshot>) {
    let inbound = match Frame::decode(text) {
        Ok(frame) => frame,
        // heart-beat
        Err(FrameError::Empty) => return,
        Err(e) => {
            warn!(error = %e, "dropping malformed frame");
            return;
        }
    };

    match inbound.command() {
        MESSAGE => {
            let Some(body) = inbound.body() else {
                debug!("message frame without body");
                return;
            };
            let envelope = match DuelEnvelope::from_json(body) {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!(error = %e, "dropping undecodable duel message");
                    return;
                }
            };
            let Some(event) = envelope.event() else {
                debug!(kind = %envelope.kind, "ignoring duel message");
                return;
            };
            if !snapshot.send_if_modified(|s| s.apply(event)) {
                debug!(kind = %envelope.kind, "duel message had no effect");
            }
        }
        ERROR => {
            warn!(
                detail = inbound.header("message").unwrap_or_default(),
                "server reported an error"
            );
        }
        CONNECTED => {
            debug!(
                version = inbound.header("version").unwrap_or_default(),
                "duel connection accepted"
            );
        }
        other => debug!(command = other, "ignoring frame"),
    }
}
