use async_trait::async_trait;

use crate::models::{PortalItem, PortalSession, SearchQuery, WebMap};
use crate::utils::PortalError;

#[async_trait]
pub trait SessionProvider: Send + Sync + std::fmt::Debug {
    /// Connect to the portal.
    /// Fails with `PortalError::Connection` when authentication or network setup fails.
    async fn create_session(&self) -> Result<PortalSession, PortalError>;
}

#[async_trait]
pub trait CatalogSearch: Send + Sync + std::fmt::Debug {
    /// The portal's canned "featured items" query, in server rank order.
    async fn search_featured(&self, session: &PortalSession)
    -> Result<Vec<PortalItem>, PortalError>;

    /// Ranked search. Results keep the order the portal returned them in.
    async fn search(
        &self,
        session: &PortalSession,
        query: &SearchQuery,
    ) -> Result<Vec<PortalItem>, PortalError>;
}

#[async_trait]
pub trait MapResolver: Send + Sync + std::fmt::Debug {
    /// Fails with `PortalError::Load` on a missing, invalid or unauthorized item.
    async fn resolve_map(
        &self,
        item: &PortalItem,
        session: &PortalSession,
    ) -> Result<WebMap, PortalError>;
}

/// Everything the search/load view model needs from a portal.
pub trait PortalBackend: SessionProvider + CatalogSearch + MapResolver {}

impl<T> PortalBackend for T where T: SessionProvider + CatalogSearch + MapResolver {}
