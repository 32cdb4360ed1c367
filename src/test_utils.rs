#![cfg(test)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::backends::traits::{CatalogSearch, MapResolver, SessionProvider};
use crate::models::{
    Basemap, MapLayer, PortalItem, PortalItemId, PortalSession, SearchQuery, WebMap,
};
use crate::ui::notifier::ErrorNotifier;
use crate::utils::PortalError;

/// Holds a mock call in flight until the test opens it.
#[derive(Debug)]
pub struct Gate {
    open: watch::Sender<bool>,
    arrivals: watch::Sender<usize>,
}

impl Gate {
    fn new() -> Self {
        Self {
            open: watch::Sender::new(false),
            arrivals: watch::Sender::new(0),
        }
    }

    async fn pass(&self) {
        self.arrivals.send_modify(|count| *count += 1);
        let mut open = self.open.subscribe();
        let _ = open.wait_for(|open| *open).await;
    }

    pub fn open(&self) {
        self.open.send_replace(true);
    }

    /// Resolve once `count` calls are parked at (or have passed) the gate.
    pub async fn arrived(&self, count: usize) {
        let mut arrivals = self.arrivals.subscribe();
        let _ = arrivals.wait_for(|seen| *seen >= count).await;
    }
}

pub fn item(id: &str, title: &str) -> PortalItem {
    PortalItem::new(id, title)
}

pub fn web_map_for(item: &PortalItem) -> WebMap {
    WebMap {
        item: item.clone(),
        version: Some("2.31".to_string()),
        basemap: Basemap {
            title: "Topographic".to_string(),
            layers: vec![MapLayer {
                id: "World_Topo_Map".to_string(),
                title: None,
                layer_type: Some("ArcGISTiledMapServiceLayer".to_string()),
                url: None,
                visible: true,
                opacity: 1.0,
            }],
        },
        operational_layers: Vec::new(),
        spatial_reference: None,
    }
}

/// Scripted in-memory portal.
#[derive(Debug, Default)]
pub struct MockPortal {
    pub session_calls: AtomicUsize,
    pub featured_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub resolve_calls: AtomicUsize,
    session_error: Mutex<Option<PortalError>>,
    featured: Mutex<Option<Result<Vec<PortalItem>, PortalError>>>,
    searches: Mutex<HashMap<String, Result<Vec<PortalItem>, PortalError>>>,
    maps: Mutex<HashMap<PortalItemId, Result<WebMap, PortalError>>>,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockPortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_featured(self, items: Vec<PortalItem>) -> Self {
        *self.featured.lock().unwrap() = Some(Ok(items));
        self
    }

    pub fn with_featured_error(self, error: PortalError) -> Self {
        *self.featured.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn with_search(self, text: &str, items: Vec<PortalItem>) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(text.to_string(), Ok(items));
        self
    }

    pub fn with_search_error(self, text: &str, error: PortalError) -> Self {
        self.searches
            .lock()
            .unwrap()
            .insert(text.to_string(), Err(error));
        self
    }

    pub fn with_map(self, item: &PortalItem) -> Self {
        self.maps
            .lock()
            .unwrap()
            .insert(item.id.clone(), Ok(web_map_for(item)));
        self
    }

    pub fn with_map_error(self, item: &PortalItem, error: PortalError) -> Self {
        self.maps.lock().unwrap().insert(item.id.clone(), Err(error));
        self
    }

    pub fn fail_sessions(&self, error: Option<PortalError>) {
        *self.session_error.lock().unwrap() = error;
    }

    /// Gate keys: `session`, `featured`, `search:<text>`, `resolve:<item id>`.
    pub fn gate(&self, key: &str) -> Arc<Gate> {
        self.gates
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Gate::new()))
            .clone()
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }

    async fn pass_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.pass().await;
        }
    }
}

#[async_trait]
impl SessionProvider for MockPortal {
    async fn create_session(&self) -> Result<PortalSession, PortalError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate("session").await;
        if let Some(error) = self.session_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(PortalSession::anonymous("https://portal.test"))
    }
}

#[async_trait]
impl CatalogSearch for MockPortal {
    async fn search_featured(
        &self,
        _session: &PortalSession,
    ) -> Result<Vec<PortalItem>, PortalError> {
        self.featured_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate("featured").await;
        self.featured
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn search(
        &self,
        _session: &PortalSession,
        query: &SearchQuery,
    ) -> Result<Vec<PortalItem>, PortalError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        self.pass_gate(&format!("search:{}", query.text)).await;
        self.searches
            .lock()
            .unwrap()
            .get(&query.text)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl MapResolver for MockPortal {
    async fn resolve_map(
        &self,
        item: &PortalItem,
        _session: &PortalSession,
    ) -> Result<WebMap, PortalError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(&format!("resolve:{}", item.id)).await;
        self.maps
            .lock()
            .unwrap()
            .get(&item.id)
            .cloned()
            .unwrap_or_else(|| {
                Err(PortalError::Load(format!(
                    "Item {} does not exist or is inaccessible.",
                    item.id
                )))
            })
    }
}

/// Notifier that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl ErrorNotifier for RecordingNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
