pub mod console_view;

pub use console_view::{ConsoleNotifier, ConsoleView};

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::backends::ArcGisPortal;
use crate::config::Config;
use crate::ui::viewmodels::SearchLoadViewModel;

/// Featured maps, an optional search, then the top result loaded as a web map.
pub async fn run(config: Config, query: Option<String>) -> Result<()> {
    let portal = ArcGisPortal::new(
        config.portal.url.clone(),
        config.portal.request_timeout(),
        config.search.clone(),
    )
    .context("Failed to create portal client")?;
    info!("Using portal {}", portal.portal_url());

    let vm = SearchLoadViewModel::new(
        Arc::new(portal),
        Arc::new(ConsoleNotifier),
        config.search.clone(),
    );
    let _view = ConsoleView::attach(&vm);

    if let Some(initial_load) = vm.take_initial_load() {
        initial_load
            .await
            .context("Featured items task panicked")?;
    }
    print!(
        "{}",
        ConsoleView::render_results("Featured web maps", &vm.search_results().get())
    );

    if let Some(query) = query {
        vm.set_search_text(query.clone());
        if let Some(search) = vm.search_command().execute(()) {
            search.await.context("Search task panicked")?;
        }
        print!(
            "{}",
            ConsoleView::render_results(&format!("Results for '{}'", query), &vm.search_results().get())
        );
    }

    let top = vm.search_results().get().into_iter().next();
    if let Some(load) = vm.load_map_command().execute(top) {
        let outcome = load.await.context("Load task panicked")?;
        if let (true, Some(map)) = (outcome.is_completed(), vm.loaded_map().get()) {
            print!("{}", ConsoleView::render_map(&map));
        }
    }

    Ok(())
}
