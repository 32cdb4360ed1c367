pub mod notifier;
pub mod viewmodels;

pub use notifier::{ErrorNotifier, LogNotifier};
pub use viewmodels::{OperationOutcome, SearchLoadViewModel, ViewModel};
