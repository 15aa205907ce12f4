//! Actors and the channel plumbing between them.
//!
//! Events travel with the tracing span that produced them, so work done on
//! the receiving side lands under the originating context.

pub mod dock;
pub mod input;
pub mod reactor;

use tokio::sync::mpsc;
use tracing::Span;

pub struct Sender<E> {
    tx: mpsc::UnboundedSender<(Span, E)>,
}

// Derived Clone would require E: Clone.
impl<E> Clone for Sender<E> {
    fn clone(&self) -> Self { Sender { tx: self.tx.clone() } }
}

impl<E> Sender<E> {
    /// Sends an event, quietly dropping it when the receiver is gone (the
    /// actor is shutting down and no longer cares).
    pub fn send(&self, event: E) {
        if self.tx.send((Span::current(), event)).is_err() {
            tracing::trace!("dropping event for a closed receiver");
        }
    }

    pub fn try_send(&self, event: E) -> Result<(), mpsc::error::SendError<(Span, E)>> {
        self.tx.send((Span::current(), event))
    }
}

pub type Receiver<E> = mpsc::UnboundedReceiver<(Span, E)>;

pub fn channel<E>() -> (Sender<E>, Receiver<E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Sender { tx }, rx)
}
