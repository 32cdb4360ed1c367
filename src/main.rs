use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use webmap_browser::{Config, app};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("webmap_browser=info")),
        )
        .init();

    info!("Starting web map browser");

    let config = Config::load()?;

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = (!query.trim().is_empty()).then_some(query);

    // Initialize Tokio runtime for async operations
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run(config, query))
}
