//! Upstream provider adapters.
//!
//! # Data Flow
//! ```text
//! UpstreamConfig (url template + provider kind)
//!     → client.rs (fetch(url) → bytes)
//!     → providers.rs (bytes → common Address)
//!     → race core consumes the combined call future
//! ```

pub mod client;
pub mod providers;
pub mod types;

pub use client::UpstreamClient;
pub use providers::{origin_of, ProviderKind, CEP_PLACEHOLDER};
pub use types::{Address, LookupError, LookupResult};
