//! Live-subscription handle.

use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A standing subscription to a stream of messages from the store.
///
/// Each subscription owns its receiving end of a channel; the store keeps
/// the sending end and drops it once delivery fails. **Cancellation is
/// dropping the subscription** — the next delivery attempt fails on the
/// store side and the subscriber is pruned.
///
/// Subscriptions are designed for single-threaded consumption: the UI task
/// drains messages between renders with `try_recv`.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
