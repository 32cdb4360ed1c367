use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

type Action<P, T> = Arc<dyn Fn(P) -> BoxFuture<'static, T> + Send + Sync>;
type Predicate<P> = Arc<dyn Fn(&P) -> bool + Send + Sync>;

/// An invocable UI action with an optional eligibility predicate.
///
/// Executing spawns the action on the Tokio runtime and hands back its
/// `JoinHandle`, so the caller can await the outcome or drop the handle and
/// let the action finish on its own.
pub struct AsyncCommand<P, T> {
    name: String,
    action: Action<P, T>,
    can_execute: Option<Predicate<P>>,
    /// Last predicate result; starts out as "not executable"
    can_execute_cache: Mutex<bool>,
    can_execute_changed: broadcast::Sender<bool>,
}

impl<P, T> AsyncCommand<P, T>
where
    P: Send + 'static,
    T: Send + 'static,
{
    pub fn new<F, Fut>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (can_execute_changed, _) = broadcast::channel(16);
        Self {
            name: name.into(),
            action: Arc::new(move |parameter: P| action(parameter).boxed()),
            can_execute: None,
            can_execute_cache: Mutex::new(false),
            can_execute_changed,
        }
    }

    pub fn with_can_execute<G>(mut self, predicate: G) -> Self
    where
        G: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.can_execute = Some(Arc::new(predicate));
        self
    }

    /// Evaluate the predicate for `parameter`.
    ///
    /// A "can execute changed" notification goes out only when the result
    /// differs from the previous evaluation. Without a predicate the command
    /// is always executable and never notifies.
    pub fn can_execute(&self, parameter: &P) -> bool {
        let Some(predicate) = &self.can_execute else {
            return true;
        };

        let result = predicate(parameter);
        let mut cache = self
            .can_execute_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *cache != result {
            *cache = result;
            let _ = self.can_execute_changed.send(result);
        }
        result
    }

    /// Run the action if the predicate allows it. Returns `None` when rejected.
    pub fn execute(&self, parameter: P) -> Option<JoinHandle<T>> {
        if !self.can_execute(&parameter) {
            debug!("Command {} rejected its parameter", self.name);
            return None;
        }

        let name = self.name.clone();
        let future = (self.action)(parameter);
        Some(tokio::spawn(async move {
            let start = Instant::now();
            let output = future.await;
            debug!(
                "Command {} finished in {}ms",
                name,
                start.elapsed().as_millis()
            );
            output
        }))
    }

    pub fn subscribe_can_execute_changed(&self) -> broadcast::Receiver<bool> {
        self.can_execute_changed.subscribe()
    }
}

impl<P, T> std::fmt::Debug for AsyncCommand<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncCommand")
            .field("name", &self.name)
            .field("has_predicate", &self.can_execute.is_some())
            .finish()
    }
}
