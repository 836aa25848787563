//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! GET /cep?cep=01310100
//!     → server.rs (middleware, query extraction, input guard)
//!     → lookup::LookupService (race core)
//!     → LookupResponse serialized as JSON
//! ```

pub mod server;

pub use server::HttpServer;
