//! Inbound message subscription trait.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::errors::Result;

/// A live subscription to one bus topic.
///
/// `recv` yields raw payloads; `None` means the stream has ended for good.
/// `close` releases the underlying subscription and is called exactly once by
/// the consumer loop before it exits.
#[async_trait]
pub trait MessageSubscription: Send {
    async fn recv(&mut self) -> Option<Result<Vec<u8>>>;

    async fn close(&mut self);
}

/// Channel-backed subscription, used in tests and for in-process wiring.
pub struct ChannelSubscription {
    rx: mpsc::UnboundedReceiver<Result<Vec<u8>>>,
    closed: Option<mpsc::UnboundedSender<()>>,
}

impl ChannelSubscription {
    /// Creates a subscription and the sender that feeds it.
    pub fn new() -> (mpsc::UnboundedSender<Result<Vec<u8>>>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx, closed: None })
    }

    /// Returns a receiver that gets one message when `close` is called.
    pub fn on_close(&mut self) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.closed = Some(tx);
        rx
    }
}

#[async_trait]
impl MessageSubscription for ChannelSubscription {
    async fn recv(&mut self) -> Option<Result<Vec<u8>>> {
        self.rx.recv().await
    }

    async fn close(&mut self) {
        self.rx.close();
        if let Some(closed) = self.closed.take() {
            let _ = closed.send(());
        }
    }
}
