//! Common address shape and error definitions for upstream lookups.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Postal address in the common shape all providers are mapped onto.
///
/// Every field is a plain string; a field the provider did not supply is
/// carried as an empty string rather than a null. Field names follow the
/// ViaCEP wire format, which the service's own responses also use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Address {
    /// Postal code.
    pub cep: String,

    /// Street.
    pub logradouro: String,

    /// Neighborhood.
    pub bairro: String,

    /// City.
    pub localidade: String,

    /// State code (two letters).
    pub uf: String,
}

/// Errors that can occur while querying a single upstream.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network or connection failure, including non-2xx responses.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream returned a payload that does not decode into an Address.
    #[error("parse error: {0}")]
    Parse(String),

    /// A race was started with no upstream calls.
    #[error("no upstreams configured")]
    NoUpstreams,
}

/// Result type for upstream lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
