//! CEP lookup service that races multiple upstream address providers and
//! answers with whichever responds first within a bounded deadline.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod race;
pub mod upstream;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use lookup::LookupService;
