pub mod errors;

pub use errors::PortalError;
