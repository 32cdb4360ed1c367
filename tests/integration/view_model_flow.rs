use crate::common::fixtures;
use crate::common::mocks::RecordingNotifier;
use crate::common::{WEB_MAP_FILTER, mock_json, mock_search, portal_for};
use mockito::{Matcher, Server};
use std::sync::Arc;
use webmap_browser::{OperationOutcome, PortalError, SearchLoadViewModel, SearchSettings};

#[tokio::test]
async fn test_featured_search_and_load_against_portal() {
    let mut server = Server::new_async().await;
    let _self = mock_json(
        &mut server,
        "/sharing/rest/portals/self",
        Matcher::Any,
        fixtures::portal_self(),
    )
    .await;
    let _featured = mock_search(
        &mut server,
        WEB_MAP_FILTER,
        fixtures::search_results(&[("f1", "Featured Topo"), ("f2", "Featured Imagery")]),
    )
    .await;
    let _rivers = mock_search(
        &mut server,
        &format!("rivers {}", WEB_MAP_FILTER),
        fixtures::search_results(&[("r1", "Major Rivers"), ("r2", "River Gauges")]),
    )
    .await;
    let _data = mock_json(
        &mut server,
        "/sharing/rest/content/items/r1/data",
        Matcher::Any,
        fixtures::web_map("Rivers"),
    )
    .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let vm = SearchLoadViewModel::new(
        Arc::new(portal_for(&server)),
        notifier.clone(),
        SearchSettings::default(),
    );

    let featured = vm.take_initial_load().unwrap().await.unwrap();
    assert_eq!(featured, OperationOutcome::Completed);
    let titles: Vec<_> = vm.search_results().get().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["Featured Topo", "Featured Imagery"]);
    assert_eq!(
        vm.session().unwrap().portal_name.as_deref(),
        Some("Test Portal")
    );

    vm.set_search_text("rivers");
    let searched = vm.search_command().execute(()).unwrap().await.unwrap();
    assert_eq!(searched, OperationOutcome::Completed);
    let results = vm.search_results().get();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id.as_str(), "r1");

    let loaded = vm
        .load_map_command()
        .execute(Some(results[0].clone()))
        .unwrap()
        .await
        .unwrap();
    assert_eq!(loaded, OperationOutcome::Completed);

    let map = vm.loaded_map().get().unwrap();
    assert_eq!(map.title(), "Major Rivers");
    assert_eq!(map.basemap.title, "Light Gray Canvas");
    assert_eq!(vm.selected_item().get().unwrap().id.as_str(), "r1");
    assert!(!vm.is_busy().get());
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_unreachable_item_is_reported_and_state_kept() {
    let mut server = Server::new_async().await;
    let _self = mock_json(
        &mut server,
        "/sharing/rest/portals/self",
        Matcher::Any,
        fixtures::portal_self(),
    )
    .await;
    let _featured = mock_search(
        &mut server,
        WEB_MAP_FILTER,
        fixtures::search_results(&[("gone", "Deleted Map")]),
    )
    .await;
    let _data = mock_json(
        &mut server,
        "/sharing/rest/content/items/gone/data",
        Matcher::Any,
        fixtures::portal_error(400, "Item does not exist or is inaccessible."),
    )
    .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let vm = SearchLoadViewModel::new(
        Arc::new(portal_for(&server)),
        notifier.clone(),
        SearchSettings::default(),
    );
    vm.take_initial_load().unwrap().await.unwrap();

    let item = vm.search_results().get().into_iter().next();
    let outcome = vm.load_map_command().execute(item).unwrap().await.unwrap();

    assert!(matches!(outcome, OperationOutcome::Failed(PortalError::Load(_))));
    assert!(vm.loaded_map().get().is_none());
    assert!(vm.selected_item().get().is_none());
    assert!(!vm.is_busy().get());
    assert_eq!(notifier.messages().len(), 1);
    assert!(notifier.messages()[0].contains("Item does not exist or is inaccessible."));
}

#[tokio::test]
async fn test_unreachable_portal_is_reported_for_every_operation() {
    let mut server = Server::new_async().await;
    let _self = server
        .mock("GET", "/sharing/rest/portals/self")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let vm = SearchLoadViewModel::new(
        Arc::new(portal_for(&server)),
        notifier.clone(),
        SearchSettings::default(),
    );

    let featured = vm.take_initial_load().unwrap().await.unwrap();
    assert!(matches!(featured, OperationOutcome::Failed(PortalError::Connection(_))));

    let searched = vm.search("anything").await;
    assert!(matches!(searched, OperationOutcome::Failed(PortalError::Connection(_))));

    assert!(vm.search_results().get().is_empty());
    assert!(vm.last_error().get().is_some());
    assert_eq!(notifier.messages().len(), 2);
    assert!(!vm.is_busy().get());
}
