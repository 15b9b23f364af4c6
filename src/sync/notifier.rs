//! Change notification for the active locale's resolved wording.
//!
//! The notifier is one owned mutable slot holding the current resolved
//! document plus a registry of subscriber channels. Subscribing delivers the
//! current document immediately and then every published change in order.
//! Subscriptions are explicit handles: dropping a [`Subscription`] closes its
//! channel and the registry prunes it on the next publish, so there is no
//! reliance on weak-reference cleanup.

use crate::wording::Wording;
use futures::Stream;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::debug;

/// Publishes the current resolved document and its changes to subscribers.
#[derive(Debug)]
pub struct WordingNotifier<W> {
    inner: Mutex<NotifierInner<W>>,
}

#[derive(Debug)]
struct NotifierInner<W> {
    current: W,
    subscribers: Vec<mpsc::UnboundedSender<W>>,
}

impl<W: Wording> WordingNotifier<W> {
    /// Create a notifier holding `initial` as the current document.
    pub fn new(initial: W) -> Self {
        Self {
            inner: Mutex::new(NotifierInner {
                current: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// The current resolved document.
    pub fn current(&self) -> W {
        self.inner.lock().unwrap().current.clone()
    }

    /// Subscribe to document changes.
    ///
    /// The current document is delivered immediately; every later publish is
    /// delivered in order. Drop the subscription to stop receiving.
    pub fn subscribe(&self) -> Subscription<W> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap();
        // Delivery cannot fail here, the receiver is still in scope.
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    /// Replace the current document and notify all subscribers.
    ///
    /// Publishing a document equal to the current one is a no-op, so repeated
    /// refreshes of unchanged content do not produce duplicate notifications.
    pub fn publish(&self, next: W) {
        let mut inner = self.inner.lock().unwrap();
        if inner.current == next {
            debug!("Skipping publish of unchanged wording");
            return;
        }
        inner.current = next.clone();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(next.clone()).is_ok());
    }

    /// Number of live subscriptions, after pruning closed ones.
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.retain(|subscriber| !subscriber.is_closed());
        inner.subscribers.len()
    }
}

/// Handle to a notifier subscription.
///
/// Receives the current document on creation and each change thereafter, in
/// the order they occurred. Also usable as a [`Stream`] of documents.
#[derive(Debug)]
pub struct Subscription<W> {
    rx: mpsc::UnboundedReceiver<W>,
}

impl<W: Wording> Subscription<W> {
    /// Wait for the next document. Returns `None` once the notifier is gone
    /// and all pending documents have been received.
    pub async fn recv(&mut self) -> Option<W> {
        self.rx.recv().await
    }

    /// Take the next document without waiting, if one is pending.
    pub fn try_recv(&mut self) -> Option<W> {
        self.rx.try_recv().ok()
    }
}

impl<W: Wording> Stream for Subscription<W> {
    type Item = W;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<W>> {
        self.rx.poll_recv(cx)
    }
}
