// # Record Provider Trait
//
// Defines the interface for executing record operations against the DNS host.
//
// ## Implementations
//
// - dns-lexicon CLI (Gandi): `gandi-dns-provider-lexicon` crate
// - Future: direct REST clients for other hosts
//
// ## Usage
//
// ```rust,ignore
// use gandi_dns_core::{RecordProvider, A_RECORD};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* RecordProvider implementation */;
//
//     let records = provider.list("example.com").await?;
//     if records.is_empty() {
//         provider.create("example.com", A_RECORD, "192.168.1.2").await?;
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The only record type this system manages
pub const A_RECORD: &str = "A";

/// A DNS record as reported by the provider's list operation
///
/// Only `name` is consulted when matching against a desired domain; the
/// remaining fields are carried for logging and diagnostics. Unknown fields
/// in the provider output are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRecord {
    /// Provider-specific record ID
    #[serde(default)]
    pub id: Option<String>,

    /// Record type (e.g. "A")
    #[serde(rename = "type", default)]
    pub rtype: Option<String>,

    /// The record name (fully-qualified)
    pub name: String,

    /// Time-to-live for the record
    #[serde(default)]
    pub ttl: Option<u32>,

    /// Record content (the address for "A" records)
    #[serde(default)]
    pub content: Option<String>,
}

impl ExistingRecord {
    /// Create a record with only a name, for tests and fakes
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            rtype: None,
            name: name.into(),
            ttl: None,
            content: None,
        }
    }
}

/// Trait for record provider client implementations
///
/// This trait defines the interface for listing and mutating DNS records.
/// Implementations must handle the specifics of each provider's transport
/// (CLI subprocess, REST API, ...).
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Constraints
///
/// Providers are single-shot, stateless collaborators:
///
/// - One external call per trait method invocation
/// - No retry or backoff logic (failures are fatal to the invocation;
///   the caller re-invokes with the same desired state and relies on the
///   reconciler's idempotency check to make retries safe)
/// - No caching of provider state between calls
/// - No background tasks
/// - Errors propagate verbatim, with enough context (domain, operation,
///   underlying cause) for an operator to diagnose credential or
///   connectivity problems
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// List all records of the managed type for a domain
    ///
    /// # Parameters
    ///
    /// - `domain`: The fully-qualified domain name
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ExistingRecord>)`: The records currently present
    /// - `Err(Error)`: Transport or parse failure; terminal for the invocation
    async fn list(&self, domain: &str) -> Result<Vec<ExistingRecord>, crate::Error>;

    /// Create a record
    ///
    /// # Parameters
    ///
    /// - `domain`: The fully-qualified domain name
    /// - `record_type`: The DNS record type (always [`A_RECORD`] today)
    /// - `content`: The record content (dotted-quad address for "A" records)
    async fn create(
        &self,
        domain: &str,
        record_type: &str,
        content: &str,
    ) -> Result<(), crate::Error>;

    /// Delete a record
    ///
    /// # Parameters
    ///
    /// - `domain`: The fully-qualified domain name
    /// - `record_type`: The DNS record type (always [`A_RECORD`] today)
    /// - `content`: The record content the deleted record must carry
    async fn delete(
        &self,
        domain: &str,
        record_type: &str,
        content: &str,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing record providers from configuration
pub trait RecordProviderFactory: Send + Sync {
    /// Create a RecordProvider instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider
    ///
    /// # Returns
    ///
    /// A boxed RecordProvider trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn RecordProvider>, crate::Error>;
}
