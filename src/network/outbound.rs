//! Outbound line queue.
//!
//! Everything the bot sends goes through one bounded channel drained by a
//! single writer task, so lines produced concurrently (the read loop,
//! delayed handshake steps, broadcast timers) never interleave on the wire.

use crate::error::{BotError, ProtocolError};
use futures_util::{Sink, SinkExt};
use std::borrow::Cow;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Cloneable handle for queueing outbound lines.
#[derive(Debug, Clone)]
pub struct Outbound {
    tx: mpsc::Sender<String>,
}

impl Outbound {
    /// Create a handle and the receiver the writer task drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queue a line, waiting for room if the queue is full.
    pub async fn send(&self, line: impl Into<String>) -> Result<(), BotError> {
        self.tx
            .send(line.into())
            .await
            .map_err(|_| BotError::OutboundClosed)
    }

    /// Queue a line after `delay`, unless `shutdown` fires first.
    pub fn send_after(&self, delay: Duration, line: String, shutdown: CancellationToken) {
        let outbound = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if outbound.send(line).await.is_err() {
                        debug!("outbound closed before delayed line was sent");
                    }
                }
            }
        });
    }
}

/// Drain `rx` into `sink` until every [`Outbound`] handle is dropped.
///
/// A line the codec refuses is logged and skipped; any other write error
/// ends the writer.
pub async fn write_lines<S>(mut rx: mpsc::Receiver<String>, mut sink: S) -> Result<(), BotError>
where
    S: Sink<String, Error = ProtocolError> + Unpin,
{
    while let Some(line) = rx.recv().await {
        debug!(line = %redact(&line), ">>");
        match sink.send(line).await {
            Ok(()) => {}
            Err(ProtocolError::IllegalControlChar(ch)) => {
                warn!(char = ?ch, "dropping outbound line with illegal control character");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Hide credentials in `... :AUTH <account> <password>` lines.
fn redact(line: &str) -> Cow<'_, str> {
    match line.find(" :AUTH ") {
        Some(idx) => Cow::Owned(format!("{} :AUTH ****", &line[..idx])),
        None => Cow::Borrowed(line),
    }
}
