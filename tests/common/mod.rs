pub mod fixtures;
pub mod mocks;

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::Value;
use std::time::Duration;
use webmap_browser::{ArcGisPortal, SearchSettings};

pub const WEB_MAP_FILTER: &str = r#"type:"web map" NOT "web mapping application""#;

pub fn portal_for(server: &ServerGuard) -> ArcGisPortal {
    ArcGisPortal::new(server.url(), Duration::from_secs(5), SearchSettings::default())
        .expect("Failed to create portal client")
}

pub async fn mock_json(server: &mut ServerGuard, path: &str, query: Matcher, body: Value) -> Mock {
    server
        .mock("GET", path)
        .match_query(query)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Search mock matching the exact `q` parameter the portal receives.
pub async fn mock_search(server: &mut ServerGuard, q: &str, body: Value) -> Mock {
    mock_json(
        server,
        "/sharing/rest/search",
        Matcher::UrlEncoded("q".into(), q.into()),
        body,
    )
    .await
}
