pub mod session;

pub use session::SessionCache;
