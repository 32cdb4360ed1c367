use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::command::AsyncCommand;
use super::{Property, PropertySubscriber, ViewModel};
use crate::backends::traits::PortalBackend;
use crate::models::{PortalItem, PortalSession, SearchSettings, WebMap};
use crate::services::SessionCache;
use crate::ui::notifier::ErrorNotifier;
use crate::utils::PortalError;

pub const ERROR_TITLE: &str = "Web map error";

/// How a view model operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The response was applied to the observable state
    Completed,
    /// A newer request of the same kind was issued first; nothing was applied
    Superseded,
    /// The failure was reported and the state left as it was
    Failed(PortalError),
}

impl OperationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, OperationOutcome::Completed)
    }

    pub fn error(&self) -> Option<&PortalError> {
        match self {
            OperationOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Monotonic request tokens; only the newest request may apply its response.
#[derive(Debug, Default)]
struct RequestSequence {
    latest: Mutex<u64>,
}

impl RequestSequence {
    fn issue(&self) -> u64 {
        let mut latest = lock(&self.latest);
        *latest += 1;
        *latest
    }

    /// Locks the sequence; while the guard lives no newer token can be issued.
    fn current(&self) -> MutexGuard<'_, u64> {
        lock(&self.latest)
    }
}

/// Keeps `is_busy` raised while at least one operation is running.
struct BusyGuard<'a> {
    state: &'a State,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.state.in_flight);
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.state.is_busy.set(false);
        }
    }
}

struct State {
    backend: Arc<dyn PortalBackend>,
    notifier: Arc<dyn ErrorNotifier>,
    settings: SearchSettings,
    session: SessionCache,
    is_busy: Property<bool>,
    search_text: Property<String>,
    search_results: Property<Vec<PortalItem>>,
    selected_item: Property<Option<PortalItem>>,
    loaded_map: Property<Option<WebMap>>,
    last_error: Property<Option<String>>,
    in_flight: Mutex<usize>,
    searches: RequestSequence,
    loads: RequestSequence,
}

impl State {
    fn begin_operation(&self) -> BusyGuard<'_> {
        {
            let mut in_flight = lock(&self.in_flight);
            *in_flight += 1;
            if *in_flight == 1 {
                self.is_busy.set(true);
            }
        }
        self.last_error.set(None);
        BusyGuard { state: self }
    }

    async fn session(&self) -> Result<Arc<PortalSession>, PortalError> {
        self.session.get_or_create(self.backend.as_ref()).await
    }

    /// Returns once the notifier has shown the failure. The notifier runs on
    /// the blocking pool so a modal implementation cannot stall the runtime.
    async fn report_failure(&self, operation: &str, error: &PortalError) {
        warn!("{} failed ({}): {}", operation, error.kind(), error.message());
        self.last_error.set(Some(error.message().to_string()));

        let notifier = self.notifier.clone();
        let message = error.message().to_string();
        let shown =
            tokio::task::spawn_blocking(move || notifier.notify_error(ERROR_TITLE, &message))
                .await;
        if let Err(e) = shown {
            warn!("Error notifier did not complete: {}", e);
        }
    }

    async fn finish_search(
        &self,
        token: u64,
        operation: &str,
        result: Result<Vec<PortalItem>, PortalError>,
    ) -> OperationOutcome {
        let error = {
            let latest = self.searches.current();
            if *latest != token {
                debug!("Discarding {} response {} (latest is {})", operation, token, *latest);
                return OperationOutcome::Superseded;
            }
            match result {
                Ok(items) => {
                    info!("{} returned {} items", operation, items.len());
                    self.search_results.set(items);
                    return OperationOutcome::Completed;
                }
                Err(error) => error,
            }
        };

        self.report_failure(operation, &error).await;
        OperationOutcome::Failed(error)
    }

    async fn load_featured(&self) -> OperationOutcome {
        let _busy = self.begin_operation();
        let token = self.searches.issue();
        debug!("Loading featured items (request {})", token);

        let result: Result<Vec<PortalItem>, PortalError> = async {
            let session = self.session().await?;
            self.backend.search_featured(&session).await
        }
        .await;

        self.finish_search(token, "Featured items query", result)
            .await
    }

    async fn search(&self, text: String) -> OperationOutcome {
        let _busy = self.begin_operation();
        let token = self.searches.issue();
        let query = self.settings.query(text);
        debug!("Searching for '{}' (request {})", query.text, token);

        let result: Result<Vec<PortalItem>, PortalError> = async {
            let session = self.session().await?;
            self.backend.search(&session, &query).await
        }
        .await;

        self.finish_search(token, "Search", result).await
    }

    async fn load_selected(&self, item: PortalItem) -> OperationOutcome {
        let _busy = self.begin_operation();
        let token = self.loads.issue();
        info!("Loading web map '{}' ({})", item.title, item.id);

        let result: Result<WebMap, PortalError> = async {
            let session = self.session().await?;
            self.backend.resolve_map(&item, &session).await
        }
        .await;

        let error = {
            let latest = self.loads.current();
            if *latest != token {
                debug!("Discarding map {} (a newer load was requested)", item.id);
                return OperationOutcome::Superseded;
            }
            match result {
                Ok(map) => {
                    self.selected_item.set(Some(item));
                    self.loaded_map.set(Some(map));
                    return OperationOutcome::Completed;
                }
                Err(error) => error,
            }
        };

        self.report_failure("Loading web map", &error).await;
        OperationOutcome::Failed(error)
    }
}

/// Searches a portal for web maps and loads the one the user picks.
///
/// Construction starts the featured items query in the background, so it must
/// happen inside a Tokio runtime.
pub struct SearchLoadViewModel {
    state: Arc<State>,
    search_command: AsyncCommand<(), OperationOutcome>,
    load_map_command: AsyncCommand<Option<PortalItem>, OperationOutcome>,
    initial_load: Mutex<Option<JoinHandle<OperationOutcome>>>,
}

impl SearchLoadViewModel {
    pub fn new(
        backend: Arc<dyn PortalBackend>,
        notifier: Arc<dyn ErrorNotifier>,
        settings: SearchSettings,
    ) -> Self {
        let state = Arc::new(State {
            backend,
            notifier,
            settings,
            session: SessionCache::new(),
            is_busy: Property::new(false, "is_busy"),
            search_text: Property::new(String::new(), "search_text"),
            search_results: Property::new(Vec::new(), "search_results"),
            selected_item: Property::new(None, "selected_item"),
            loaded_map: Property::new(None, "loaded_map"),
            last_error: Property::new(None, "last_error"),
            in_flight: Mutex::new(0),
            searches: RequestSequence::default(),
            loads: RequestSequence::default(),
        });

        let search_state = state.clone();
        let search_command = AsyncCommand::new("search", move |()| {
            let state = search_state.clone();
            async move {
                let text = state.search_text.get();
                state.search(text).await
            }
        });

        let load_state = state.clone();
        let load_map_command = AsyncCommand::new("load_web_map", move |item: Option<PortalItem>| {
            let state = load_state.clone();
            async move {
                match item {
                    Some(item) => state.load_selected(item).await,
                    // The predicate keeps this from running
                    None => OperationOutcome::Superseded,
                }
            }
        })
        .with_can_execute(|item: &Option<PortalItem>| item.is_some());

        let featured_state = state.clone();
        let initial_load =
            tokio::spawn(async move { featured_state.load_featured().await });

        Self {
            state,
            search_command,
            load_map_command,
            initial_load: Mutex::new(Some(initial_load)),
        }
    }

    /// Handle of the featured items query started at construction. Returns
    /// `None` once taken.
    pub fn take_initial_load(&self) -> Option<JoinHandle<OperationOutcome>> {
        lock(&self.initial_load).take()
    }

    pub async fn load_featured(&self) -> OperationOutcome {
        self.state.load_featured().await
    }

    /// Ranked web map search. Empty text broadens the query to all web maps.
    pub async fn search(&self, text: impl Into<String>) -> OperationOutcome {
        self.state.search(text.into()).await
    }

    pub async fn load_selected(&self, item: PortalItem) -> OperationOutcome {
        self.state.load_selected(item).await
    }

    /// Searches for the current `search_text`.
    pub fn search_command(&self) -> &AsyncCommand<(), OperationOutcome> {
        &self.search_command
    }

    /// Loads the given item; rejects an absent item.
    pub fn load_map_command(&self) -> &AsyncCommand<Option<PortalItem>, OperationOutcome> {
        &self.load_map_command
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.state.search_text.set(text.into());
    }

    pub fn session(&self) -> Option<Arc<PortalSession>> {
        self.state.session.get()
    }

    pub fn is_busy(&self) -> &Property<bool> {
        &self.state.is_busy
    }

    pub fn search_text(&self) -> &Property<String> {
        &self.state.search_text
    }

    pub fn search_results(&self) -> &Property<Vec<PortalItem>> {
        &self.state.search_results
    }

    pub fn selected_item(&self) -> &Property<Option<PortalItem>> {
        &self.state.selected_item
    }

    pub fn loaded_map(&self) -> &Property<Option<WebMap>> {
        &self.state.loaded_map
    }

    pub fn last_error(&self) -> &Property<Option<String>> {
        &self.state.last_error
    }
}

#[async_trait::async_trait]
impl ViewModel for SearchLoadViewModel {
    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber> {
        match property_name {
            "is_busy" => Some(self.state.is_busy.subscribe()),
            "search_text" => Some(self.state.search_text.subscribe()),
            "search_results" => Some(self.state.search_results.subscribe()),
            "selected_item" => Some(self.state.selected_item.subscribe()),
            "loaded_map" => Some(self.state.loaded_map.subscribe()),
            "last_error" => Some(self.state.last_error.subscribe()),
            _ => None,
        }
    }

    async fn refresh(&self) {
        let text = self.state.search_text.get();
        if text.trim().is_empty() {
            self.state.load_featured().await;
        } else {
            self.state.search(text).await;
        }
    }
}

impl std::fmt::Debug for SearchLoadViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchLoadViewModel")
            .field("is_busy", &self.state.is_busy.get())
            .field("search_text", &self.state.search_text.get())
            .field("results", &self.state.search_results.get().len())
            .field("selected_item", &self.state.selected_item.get().map(|i| i.id))
            .finish()
    }
}
