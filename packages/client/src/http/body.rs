//! Response body as an ordered event stream
//!
//! Once response headers arrive, a pump task drains the `h2` receive stream
//! into a channel of [`BodyEvent`]s and returns flow-control capacity as each
//! chunk leaves the wire. The stream therefore completes on its own even when
//! nobody is reading yet, and a session that started a graceful close can
//! still finish. The pump enforces the session's body cap itself: once more
//! than `max_size` bytes arrived it resets the stream with `CANCEL` and queues
//! [`BodyEvent::LengthExceeded`], so an unread body never holds more than the
//! cap plus one chunk. The consumer side, [`ResponseBody`], is single-owner:
//! moving it into a reader is the only way to consume it.

use bytes::Bytes;
use h2::{Reason, RecvStream, SendStream};
use tokio::sync::{mpsc, oneshot};

use crate::constants::NGHTTP2_CANCEL;

/// One event on a response body stream
#[derive(Debug)]
pub enum BodyEvent {
    Data(Bytes),
    End,
    Error(h2::Error),
    /// The pump reset the stream after `received` bytes crossed `limit`
    LengthExceeded { limit: usize, received: usize },
}

/// Consumer side of a response body
#[derive(Debug)]
pub struct ResponseBody {
    events: mpsc::UnboundedReceiver<BodyEvent>,
    control: Option<oneshot::Sender<Reason>>,
}

/// Producer side of a response body
#[derive(Debug)]
pub(crate) struct BodyFeed {
    events: mpsc::UnboundedSender<BodyEvent>,
    control: oneshot::Receiver<Reason>,
}

impl ResponseBody {
    pub(crate) fn channel() -> (BodyFeed, ResponseBody) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (control_tx, control_rx) = oneshot::channel();
        (
            BodyFeed {
                events: events_tx,
                control: control_rx,
            },
            ResponseBody {
                events: events_rx,
                control: Some(control_tx),
            },
        )
    }

    /// Start pumping `recv` into a new body, capped at `max_size` bytes
    /// (`0` = unlimited). `send` is kept to reset the stream on demand.
    pub(crate) fn spawn(recv: RecvStream, send: SendStream<Bytes>, max_size: usize) -> Self {
        let (feed, body) = Self::channel();
        tokio::spawn(pump(recv, send, feed, max_size));
        body
    }

    /// Next event, `None` once the producer is gone without a terminal event.
    pub async fn next_event(&mut self) -> Option<BodyEvent> {
        self.events.recv().await
    }

    /// Abort the stream with `reason` (RST_STREAM). No further events follow.
    pub fn destroy(mut self, reason: Reason) {
        self.signal(reason);
    }

    /// Close a fully received stream with `reason`. A stream that already
    /// ended on the wire is unaffected.
    pub fn close(mut self, reason: Reason) {
        self.signal(reason);
    }

    fn signal(&mut self, reason: Reason) {
        if let Some(control) = self.control.take() {
            // The pump may already have finished; nothing left to reset then.
            let _ = control.send(reason);
        }
    }
}

enum Step {
    Reset(Reason),
    Chunk(Option<Result<Bytes, h2::Error>>),
}

async fn pump(
    mut recv: RecvStream,
    mut send: SendStream<Bytes>,
    mut feed: BodyFeed,
    max_size: usize,
) {
    let mut received = 0usize;

    loop {
        let step = tokio::select! {
            command = &mut feed.control => {
                // Sender dropped: the response was discarded unread.
                Step::Reset(command.unwrap_or(NGHTTP2_CANCEL))
            }
            chunk = recv.data() => Step::Chunk(chunk),
        };

        match step {
            Step::Reset(reason) => {
                tracing::debug!("Resetting response stream after {} bytes: {:?}", received, reason);
                send.send_reset(reason);
                return;
            }
            Step::Chunk(Some(Ok(data))) => {
                received += data.len();
                // Capacity of the crossing chunk is never returned to the peer.
                if max_size > 0 && received > max_size {
                    tracing::debug!(
                        "Body exceeded {} bytes ({} received), resetting stream",
                        max_size,
                        received
                    );
                    send.send_reset(NGHTTP2_CANCEL);
                    let _ = feed.events.send(BodyEvent::LengthExceeded {
                        limit: max_size,
                        received,
                    });
                    return;
                }
                if let Err(e) = recv.flow_control().release_capacity(data.len()) {
                    tracing::warn!("Failed to release stream capacity: {}", e);
                }
                tracing::trace!("Body chunk of {} bytes ({} total)", data.len(), received);
                if feed.events.send(BodyEvent::Data(data)).is_err() {
                    send.send_reset(NGHTTP2_CANCEL);
                    return;
                }
            }
            Step::Chunk(Some(Err(e))) => {
                tracing::debug!("Response stream error after {} bytes: {}", received, e);
                let _ = feed.events.send(BodyEvent::Error(e));
                return;
            }
            Step::Chunk(None) => {
                tracing::trace!("Response stream ended after {} bytes", received);
                let _ = feed.events.send(BodyEvent::End);
                return;
            }
        }
    }
}

#[cfg(test)]
impl BodyFeed {
    pub(crate) fn data(&self, chunk: &'static [u8]) -> bool {
        self.events.send(BodyEvent::Data(Bytes::from_static(chunk))).is_ok()
    }

    pub(crate) fn end(&self) -> bool {
        self.events.send(BodyEvent::End).is_ok()
    }

    pub(crate) fn exceeded(&self, limit: usize, received: usize) -> bool {
        self.events
            .send(BodyEvent::LengthExceeded { limit, received })
            .is_ok()
    }

    pub(crate) fn fail(&self, reason: Reason) -> bool {
        self.events.send(BodyEvent::Error(h2::Error::from(reason))).is_ok()
    }

    /// Reason the consumer signalled, if it signalled one
    pub(crate) fn signalled(&mut self) -> Option<Reason> {
        self.control.try_recv().ok()
    }
}
