//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (deadline > 0) and URL templates
//! - Detect duplicate upstream names
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::upstream::providers::CEP_PLACEHOLDER;

/// A single semantic problem found in a config.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one upstream must be configured")]
    NoUpstreams,

    #[error("lookup.deadline_ms must be greater than zero")]
    ZeroDeadline,

    #[error("upstream '{0}': url_template must contain the {{cep}} placeholder")]
    MissingPlaceholder(String),

    #[error("upstream '{name}': invalid url_template: {reason}")]
    InvalidUrl { name: String, reason: String },

    #[error("duplicate upstream name '{0}'")]
    DuplicateName(String),
}

/// Check a deserialized config for semantic problems.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstreams.is_empty() {
        errors.push(ValidationError::NoUpstreams);
    }

    if config.lookup.deadline_ms == 0 {
        errors.push(ValidationError::ZeroDeadline);
    }

    let mut seen = HashSet::new();
    for upstream in &config.upstreams {
        if !seen.insert(upstream.name.as_str()) {
            errors.push(ValidationError::DuplicateName(upstream.name.clone()));
        }

        if !upstream.url_template.contains(CEP_PLACEHOLDER) {
            errors.push(ValidationError::MissingPlaceholder(upstream.name.clone()));
        }

        // Substitute a sample key so the placeholder itself does not trip
        // the URL parser.
        if let Err(e) = url::Url::parse(&upstream.url_for("00000000")) {
            errors.push(ValidationError::InvalidUrl {
                name: upstream.name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
