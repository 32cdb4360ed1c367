pub mod arcgis;
pub mod traits;

pub use arcgis::ArcGisPortal;
pub use traits::{CatalogSearch, MapResolver, PortalBackend, SessionProvider};
