//! solrnav Infrastructure Library
//!
//! The HTTP transport that connects `solrnav-core` to a real Solr server,
//! and logger setup.

pub mod logger;
pub mod transport;

pub use logger::*;
pub use transport::*;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
