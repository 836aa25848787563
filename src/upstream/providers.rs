//! Provider-specific payload decoding.
//!
//! Each supported provider has its own JSON schema; parsers map them onto
//! the common [`Address`] shape. Adding a provider means adding a variant
//! here plus a default URL template in the config schema.

use serde::{Deserialize, Serialize};

use crate::upstream::types::{Address, LookupError, LookupResult};

/// Placeholder substituted with the lookup key in upstream URL templates.
pub const CEP_PLACEHOLDER: &str = "{cep}";

/// Which JSON schema an upstream speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    BrasilApi,
    ViaCep,
}

impl ProviderKind {
    /// Decode a raw upstream body into the common address shape.
    pub fn parse(&self, body: &[u8]) -> LookupResult<Address> {
        match self {
            ProviderKind::BrasilApi => parse_brasilapi(body),
            ProviderKind::ViaCep => parse_viacep(body),
        }
    }
}

fn parse_brasilapi(body: &[u8]) -> LookupResult<Address> {
    #[derive(Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        cep: String,
        state: String,
        city: String,
        neighborhood: String,
        street: String,
    }

    let payload: Payload =
        serde_json::from_slice(body).map_err(|e| LookupError::Parse(format!("brasilapi: {}", e)))?;

    Ok(Address {
        cep: payload.cep,
        logradouro: payload.street,
        bairro: payload.neighborhood,
        localidade: payload.city,
        uf: payload.state,
    })
}

fn parse_viacep(body: &[u8]) -> LookupResult<Address> {
    #[derive(Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        // ViaCEP signals an unknown CEP with {"erro": true} and a 200.
        erro: bool,
        cep: String,
        logradouro: String,
        bairro: String,
        localidade: String,
        uf: String,
    }

    let payload: Payload =
        serde_json::from_slice(body).map_err(|e| LookupError::Parse(format!("viacep: {}", e)))?;

    if payload.erro {
        return Err(LookupError::Parse("viacep: cep not found".to_string()));
    }

    Ok(Address {
        cep: payload.cep,
        logradouro: payload.logradouro,
        bairro: payload.bairro,
        localidade: payload.localidade,
        uf: payload.uf,
    })
}

/// Derive the upstream identity reported to callers from a concrete URL.
///
/// Uses the host, matching the original wire behavior (`brasilapi.com.br`,
/// `viacep.com.br`). Falls back to the raw URL if it does not parse.
pub fn origin_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
