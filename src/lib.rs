//! Search an online map portal for web maps and load the one the user picks,
//! exposed as an observable view model a UI layer binds to.

pub mod app;
pub mod backends;
pub mod config;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use backends::{ArcGisPortal, PortalBackend};
pub use config::Config;
pub use models::{PortalItem, PortalSession, SearchQuery, SearchSettings, WebMap};
pub use ui::{ErrorNotifier, OperationOutcome, SearchLoadViewModel, ViewModel};
pub use utils::PortalError;
