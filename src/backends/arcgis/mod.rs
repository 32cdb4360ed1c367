pub mod api;


use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use self::api::types::{GroupResponse, ItemResponse, PortalSelfResponse, SearchResponse, WebMapData};
use self::api::{ArcGisApi, ArcGisApiError};
use super::traits::{CatalogSearch, MapResolver, SessionProvider};
use crate::models::{PortalId, PortalItem, PortalSession, SearchQuery, SearchSettings, WebMap};
use crate::utils::PortalError;

/// Portal collaborator backed by the ArcGIS `sharing/rest` API.
#[derive(Debug, Clone)]
pub struct ArcGisPortal {
    api: ArcGisApi,
    /// Limit, sort and type constraint used for the featured items query
    featured: SearchSettings,
}

impl ArcGisPortal {
    pub fn new(
        portal_url: impl Into<String>,
        timeout: Duration,
        featured: SearchSettings,
    ) -> Result<Self, ArcGisApiError> {
        Ok(Self {
            api: ArcGisApi::new(portal_url, timeout)?,
            featured,
        })
    }

    pub fn portal_url(&self) -> &str {
        self.api.base_url()
    }

    async fn run_search(&self, query: &SearchQuery) -> Result<Vec<PortalItem>, ArcGisApiError> {
        let q = query.query_string();
        let num = query.limit.to_string();
        let response: SearchResponse<ItemResponse> = self
            .api
            .get_json(
                "/search",
                &[
                    ("q", q.as_str()),
                    ("num", num.as_str()),
                    ("sortField", query.sort_field.as_str()),
                    ("sortOrder", query.sort_order.as_str()),
                ],
            )
            .await?;

        debug!(
            "Search '{}' returned {} of {:?} items",
            q,
            response.results.len(),
            response.total
        );

        Ok(response
            .results
            .into_iter()
            .take(query.limit)
            .map(PortalItem::from)
            .collect())
    }

    async fn featured_group(&self, group_query: &str) -> Result<Option<GroupResponse>, ArcGisApiError> {
        let response: SearchResponse<GroupResponse> = self
            .api
            .get_json("/community/groups", &[("q", group_query), ("num", "1")])
            .await?;
        Ok(response.results.into_iter().next())
    }
}

/// Item ids are opaque hex strings; anything else would escape the URL path.
fn validate_item_id(id: &str) -> Result<(), PortalError> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PortalError::Load(format!("Invalid item id '{}'", id)));
    }
    Ok(())
}

#[async_trait]
impl SessionProvider for ArcGisPortal {
    async fn create_session(&self) -> Result<PortalSession, PortalError> {
        let info: PortalSelfResponse = self
            .api
            .get_json("/portals/self", &[])
            .await
            .map_err(|e| PortalError::Connection(e.to_string()))?;

        info!(
            "Connected to portal {} ({})",
            info.name.as_deref().unwrap_or("unnamed"),
            self.api.base_url()
        );

        Ok(PortalSession {
            portal_url: self.api.base_url().to_string(),
            portal_id: info.id.map(PortalId::new),
            portal_name: info.name,
            featured_items_group_query: info.featured_items_group_query,
        })
    }
}

#[async_trait]
impl CatalogSearch for ArcGisPortal {
    async fn search_featured(
        &self,
        session: &PortalSession,
    ) -> Result<Vec<PortalItem>, PortalError> {
        let group_query = session
            .featured_items_group_query
            .as_deref()
            .filter(|q| !q.trim().is_empty());

        let group = match group_query {
            Some(group_query) => self
                .featured_group(group_query)
                .await
                .map_err(|e| PortalError::Query(e.to_string()))?,
            None => None,
        };

        let query = match group {
            Some(group) => {
                debug!(
                    "Featured items come from group {} ({})",
                    group.title.as_deref().unwrap_or(""),
                    group.id
                );
                self.featured.query(format!("group:\"{}\"", group.id))
            }
            None => {
                debug!("Portal has no featured group, using the default web map query");
                self.featured.query("")
            }
        };

        self.run_search(&query)
            .await
            .map_err(|e| PortalError::Query(e.to_string()))
    }

    async fn search(
        &self,
        _session: &PortalSession,
        query: &SearchQuery,
    ) -> Result<Vec<PortalItem>, PortalError> {
        self.run_search(query)
            .await
            .map_err(|e| PortalError::Query(e.to_string()))
    }
}

#[async_trait]
impl MapResolver for ArcGisPortal {
    async fn resolve_map(
        &self,
        item: &PortalItem,
        _session: &PortalSession,
    ) -> Result<WebMap, PortalError> {
        validate_item_id(item.id.as_str())?;

        if !item.item_type.is_empty() && !item.is_web_map() {
            return Err(PortalError::Load(format!(
                "'{}' is a {}, not a web map",
                item.title, item.item_type
            )));
        }

        let path = format!("/content/items/{}/data", item.id);
        let data: WebMapData = self
            .api
            .get_json(&path, &[])
            .await
            .map_err(|e| PortalError::Load(e.to_string()))?;

        if !data.is_web_map() {
            return Err(PortalError::Load(format!(
                "Item {} does not contain a web map definition",
                item.id
            )));
        }

        let map = data.into_web_map(item.clone());
        info!(
            "Resolved web map '{}' with {} layers",
            map.title(),
            map.layer_count()
        );
        Ok(map)
    }
}
