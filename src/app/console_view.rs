use std::fmt::Write as _;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::{PortalItem, WebMap};
use crate::ui::notifier::ErrorNotifier;
use crate::ui::viewmodels::{Property, SearchLoadViewModel};

/// Terminal stand-in for the map view: renders results and maps as text.
pub struct ConsoleView {
    watchers: Vec<JoinHandle<()>>,
}

impl ConsoleView {
    /// Subscribe to the view model's busy flag and selection for the lifetime of the view.
    pub fn attach(vm: &SearchLoadViewModel) -> Self {
        let watchers = vec![
            watch(vm.is_busy().clone(), |busy| {
                debug!("{}", if *busy { "Working..." } else { "Idle" })
            }),
            watch(vm.selected_item().clone(), |item| {
                if let Some(item) = item {
                    debug!("Selected '{}'", item.title);
                }
            }),
        ];
        Self { watchers }
    }

    pub fn render_results(heading: &str, items: &[PortalItem]) -> String {
        let mut out = format!("{} ({})\n", heading, items.len());
        if items.is_empty() {
            out.push_str("  no web maps found\n");
        }
        for (index, item) in items.iter().enumerate() {
            let _ = write!(out, "{:>3}. {} [{}]", index + 1, item.title, item.id);
            if !item.owner.is_empty() {
                let _ = write!(out, " by {}", item.owner);
            }
            if let Some(rating) = item.avg_rating {
                let _ = write!(out, " ({:.1}/5)", rating);
            }
            out.push('\n');
        }
        out
    }

    pub fn render_map(map: &WebMap) -> String {
        let mut out = format!("Web map: {}\n", map.title());
        if let Some(version) = &map.version {
            let _ = writeln!(out, "  version: {}", version);
        }
        if let Some(wkid) = map
            .spatial_reference
            .and_then(|sr| sr.latest_wkid.or(sr.wkid))
        {
            let _ = writeln!(out, "  spatial reference: {}", wkid);
        }
        let basemap = if map.basemap.title.is_empty() {
            "(none)"
        } else {
            map.basemap.title.as_str()
        };
        let _ = writeln!(out, "  basemap: {}", basemap);
        for layer in &map.operational_layers {
            let _ = writeln!(
                out,
                "  layer: {}{}",
                layer.title.as_deref().unwrap_or(&layer.id),
                if layer.visible { "" } else { " (hidden)" }
            );
        }
        out
    }
}

impl Drop for ConsoleView {
    fn drop(&mut self) {
        for watcher in &self.watchers {
            watcher.abort();
        }
    }
}

fn watch<T, F>(property: Property<T>, render: F) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) + Send + 'static,
{
    let mut subscriber = property.subscribe();
    tokio::spawn(async move {
        while subscriber.wait_for_change().await {
            render(&property.get());
        }
    })
}

/// Prints failures to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ErrorNotifier for ConsoleNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}
