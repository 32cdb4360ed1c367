use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::backends::traits::SessionProvider;
use crate::models::PortalSession;
use crate::utils::PortalError;

/// Lazily created portal session, shared for the owner's lifetime.
///
/// Concurrent first users wait on a single creation attempt. A failed attempt
/// leaves the cache empty so the next caller tries again.
#[derive(Debug, Default)]
pub struct SessionCache {
    cell: OnceCell<Arc<PortalSession>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_create<S>(&self, provider: &S) -> Result<Arc<PortalSession>, PortalError>
    where
        S: SessionProvider + ?Sized,
    {
        if let Some(session) = self.cell.get() {
            debug!("Reusing portal session for {}", session.portal_url);
            return Ok(session.clone());
        }

        self.cell
            .get_or_try_init(|| async {
                info!("Creating portal session");
                provider.create_session().await.map(Arc::new)
            })
            .await
            .cloned()
    }

    pub fn get(&self) -> Option<Arc<PortalSession>> {
        self.cell.get().cloned()
    }
}
