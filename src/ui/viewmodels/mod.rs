pub mod command;
pub mod property;
pub mod search_load_view_model;

pub use command::AsyncCommand;
pub use property::{Property, PropertySubscriber};
pub use search_load_view_model::{OperationOutcome, SearchLoadViewModel};

#[async_trait::async_trait]
pub trait ViewModel: Send + Sync {
    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber>;

    async fn refresh(&self);
}
