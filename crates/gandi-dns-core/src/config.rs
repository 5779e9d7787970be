//! Configuration types for the reconciliation system
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Desired presence state for a DNS record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    /// The record must exist
    Present,
    /// The record must not exist
    Absent,
}

impl std::str::FromStr for RecordState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(RecordState::Present),
            "absent" => Ok(RecordState::Absent),
            other => Err(crate::Error::config(format!(
                "unknown record state '{}', expected 'present' or 'absent'",
                other
            ))),
        }
    }
}

/// Declarative target state for a single DNS "A" record
///
/// Immutable input to a single reconciliation call. The reconciler converges
/// the remote provider toward this state and reports whether any mutation
/// occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredRecord {
    /// Fully-qualified domain name (e.g. "foobar.autonomic.zone")
    pub domain: String,

    /// The IPv4 address the domain should refer to
    pub address: Ipv4Addr,

    /// Desired presence state
    pub state: RecordState,
}

impl DesiredRecord {
    /// Create a desired record, validating the domain name
    pub fn new(
        domain: impl Into<String>,
        address: Ipv4Addr,
        state: RecordState,
    ) -> Result<Self, crate::Error> {
        let domain = domain.into();
        validate_domain_name(&domain)?;
        Ok(Self {
            domain,
            address,
            state,
        })
    }

    /// Validate the desired record
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_domain_name(&self.domain)
    }
}

/// Record provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// dns-lexicon CLI provider for Gandi
    Lexicon {
        /// Gandi REST API key, passed to the CLI environment
        api_token: String,
        /// Override for the lexicon binary path (defaults to "lexicon")
        command: Option<String>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Lexicon { api_token, .. } => {
                if api_token.is_empty() {
                    return Err(crate::Error::config("Gandi API token cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Lexicon { .. } => "lexicon",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Validate that a string is a valid domain name
///
/// Basic DNS domain name validation per RFC 1035. Not comprehensive but
/// catches common errors before the CLI is invoked.
pub fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.is_empty() {
        return Err(crate::Error::invalid_input("domain name cannot be empty"));
    }

    // Total length limit (RFC 1035: 253 chars max)
    if domain.len() > 253 {
        return Err(crate::Error::invalid_input(format!(
            "domain name too long: {} chars (max 253)",
            domain.len()
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::invalid_input(format!(
                "domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::invalid_input(format!(
                "domain label too long: {} chars (max 63): '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(crate::Error::invalid_input(format!(
                "domain label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::invalid_input(format!(
                "domain label cannot start or end with hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}
