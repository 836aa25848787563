//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files,
//! and every field has a default so a minimal (or absent) config works.

use serde::{Deserialize, Serialize};

use crate::upstream::providers::{ProviderKind, CEP_PLACEHOLDER};

/// Root configuration for the lookup service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream providers raced on every lookup.
    pub upstreams: Vec<UpstreamConfig>,

    /// Race deadline and client timeouts.
    pub lookup: LookupConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Defaults with the standard provider pair filled in.
    ///
    /// `Default::default()` leaves `upstreams` empty (serde's behavior for
    /// a missing list); this is the constructor main and tests want.
    pub fn standard() -> Self {
        Self {
            upstreams: UpstreamConfig::standard_pair(),
            ..Self::default()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One upstream provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Unique name for logging and metrics.
    pub name: String,

    /// JSON schema this upstream speaks.
    pub kind: ProviderKind,

    /// Lookup URL with a `{cep}` placeholder.
    pub url_template: String,
}

impl UpstreamConfig {
    /// The two providers the original service raced.
    pub fn standard_pair() -> Vec<Self> {
        vec![
            Self {
                name: "brasilapi".to_string(),
                kind: ProviderKind::BrasilApi,
                url_template: "https://brasilapi.com.br/api/cep/v1/{cep}".to_string(),
            },
            Self {
                name: "viacep".to_string(),
                kind: ProviderKind::ViaCep,
                url_template: "http://viacep.com.br/ws/{cep}/json/".to_string(),
            },
        ]
    }

    /// Concrete lookup URL for a given cep.
    pub fn url_for(&self, cep: &str) -> String {
        self.url_template.replace(CEP_PLACEHOLDER, cep)
    }
}

/// Race deadline and upstream client timeouts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Total time budget for one race, in milliseconds.
    pub deadline_ms: u64,

    /// Connect timeout for upstream requests, in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            deadline_ms: 1000,
            connect_timeout_ms: 500,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
