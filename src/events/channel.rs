//! Event channel implementation using crossbeam-channel.
//!
//! Lets the corpus builder report progress to a spinner running on
//! another thread.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to the corpus builder and cache.
///
/// A sender without a channel behind it (see [`null_sender`]) drops every
/// event, so callers never need to branch on whether anyone is listening.
#[derive(Clone, Default)]
pub struct EventSender {
    inner: Option<Sender<Event>>,
}

impl EventSender {
    /// Deliver an event, discarding it if the receiver has gone away.
    pub fn send(&self, event: Event) {
        if let Some(sender) = &self.inner {
            let _ = sender.send(event);
        }
    }
}

/// Receiving half, drained by the UI layer.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once every sender is dropped
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Take an event if one is already queued
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Iterate until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Constructors for connected sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel. Progress events are small and infrequent.
    pub fn new() -> (EventSender, EventReceiver) {
        Self::wrap(unbounded())
    }

    /// Channel holding at most `capacity` undelivered events
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        Self::wrap(bounded(capacity))
    }

    fn wrap((sender, receiver): (Sender<Event>, Receiver<Event>)) -> (EventSender, EventReceiver) {
        (
            EventSender {
                inner: Some(sender),
            },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender that goes nowhere, for tests and non-interactive callers.
pub fn null_sender() -> EventSender {
    EventSender::default()
}
