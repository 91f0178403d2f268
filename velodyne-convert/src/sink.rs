use crate::demand::{ComposedView, OutputView, PublishSink};
use crossbeam_channel::{bounded, Receiver, RecvError, RecvTimeoutError, Sender, TrySendError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

#[derive(Debug, Default)]
struct Topics {
    next_id: u64,
    subscribers: HashMap<OutputView, Vec<(u64, Sender<ComposedView>)>>,
}

fn lock(topics: &Mutex<Topics>) -> MutexGuard<'_, Topics> {
    topics.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process sink delivering views over bounded channels.
///
/// A full subscriber queue drops the new message rather than stalling the
/// converter.
#[derive(Clone, Debug, Default)]
pub struct ChannelSink {
    topics: Arc<Mutex<Topics>>,
}

impl ChannelSink {
    pub fn new() -> Self {
        ChannelSink::default()
    }

    /// Registers a consumer of `view` holding at most `depth` messages.
    pub fn subscribe(&self, view: OutputView, depth: usize) -> Subscription {
        let (tx, rx) = bounded(depth);
        let mut topics = lock(&self.topics);
        let id = topics.next_id;
        topics.next_id += 1;
        topics.subscribers.entry(view).or_default().push((id, tx));
        log::debug!("New subscriber #{} on {}", id, view.topic());

        Subscription {
            view,
            id,
            rx,
            topics: Arc::downgrade(&self.topics),
        }
    }
}

impl PublishSink for ChannelSink {
    fn subscription_count(&self, view: OutputView) -> usize {
        lock(&self.topics).subscribers.get(&view).map_or(0, Vec::len)
    }

    fn publish(&self, message: ComposedView) {
        let view = message.view();
        let topics = lock(&self.topics);
        let Some((last, others)) = topics
            .subscribers
            .get(&view)
            .and_then(|subscribers| subscribers.split_last())
        else {
            return;
        };

        for (id, tx) in others {
            deliver(view, *id, tx, message.clone());
        }
        deliver(view, last.0, &last.1, message);
    }
}

fn deliver(view: OutputView, id: u64, tx: &Sender<ComposedView>, message: ComposedView) {
    match tx.try_send(message) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            log::warn!("Subscriber #{} on {} is lagging, dropping a cloud", id, view.topic());
        }
        // The subscription is being dropped and will unregister itself.
        Err(TrySendError::Disconnected(_)) => {}
    }
}

/// Consumer side of a [`ChannelSink`] topic. Dropping it withdraws the demand.
#[derive(Debug)]
pub struct Subscription {
    view: OutputView,
    id: u64,
    rx: Receiver<ComposedView>,
    topics: Weak<Mutex<Topics>>,
}

impl Subscription {
    pub fn view(&self) -> OutputView {
        self.view
    }

    pub fn receiver(&self) -> &Receiver<ComposedView> {
        &self.rx
    }

    pub fn recv(&self) -> Result<ComposedView, RecvError> {
        self.rx.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<ComposedView, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(topics) = self.topics.upgrade() else {
            return;
        };
        let mut topics = lock(&topics);
        if let Some(subscribers) = topics.subscribers.get_mut(&self.view) {
            subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}
