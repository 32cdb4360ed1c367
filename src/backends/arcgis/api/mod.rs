pub mod client;
pub mod errors;
pub mod types;

pub use client::ArcGisApi;
pub use errors::ArcGisApiError;
