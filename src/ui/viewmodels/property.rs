use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

const NOTIFY_CAPACITY: usize = 100;

/// Receiving end of a property's change notifications.
///
/// The owner decides which task or loop drains it; nothing is delivered on an
/// implicit thread.
pub struct PropertySubscriber {
    receiver: broadcast::Receiver<()>,
}

// PropertySubscriber intentionally does not implement Clone.
// To get multiple subscribers, call Property::subscribe() multiple times.

impl PropertySubscriber {
    pub async fn wait_for_change(&mut self) -> bool {
        match self.receiver.recv().await {
            Ok(_) => true,
            // Lagging still means something changed
            Err(broadcast::error::RecvError::Lagged(_)) => true,
            Err(broadcast::error::RecvError::Closed) => false,
        }
    }

    pub fn try_recv(&mut self) -> bool {
        match self.receiver.try_recv() {
            Ok(_) => true,
            Err(broadcast::error::TryRecvError::Empty) => false,
            Err(broadcast::error::TryRecvError::Lagged(_)) => true,
            Err(broadcast::error::TryRecvError::Closed) => false,
        }
    }

    /// Drain pending notifications, returning how many were queued.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.try_recv() {
            count += 1;
        }
        count
    }
}

/// Observable value. Every assignment notifies all current subscribers
/// before `set` returns.
pub struct Property<T: Clone + Send + Sync> {
    value: Arc<RwLock<T>>,
    sender: broadcast::Sender<()>,
    name: String,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            value: Arc::new(RwLock::new(initial_value)),
            sender,
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, new_value: T) {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *value = new_value;
        }
        let _ = self.sender.send(());
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            updater(&mut *value);
        }
        let _ = self.sender.send(());
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        PropertySubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({} = {:?})", self.name, self.get())
    }
}

impl<T: Clone + Send + Sync> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            sender: self.sender.clone(),
            name: self.name.clone(),
        }
    }
}
