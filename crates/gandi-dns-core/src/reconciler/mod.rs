//! Core reconciler
//!
//! The Reconciler is responsible for:
//! - Listing existing records via RecordProvider
//! - Deciding whether the desired state is already satisfied
//! - Performing the minimal create/delete needed to converge
//! - Reporting whether any mutation occurred
//!
//! ## Flow
//!
//! ```text
//! DesiredRecord ──▶ ┌────────────┐ ──▶ provider.list(domain)
//!                   │ Reconciler │ ──▶ provider.create / provider.delete
//!                   └────────────┘ ──▶ ReconcileOutcome { changed }
//! ```
//!
//! One invocation performs at most one list call and at most one
//! create-or-delete call, sequentially. Every provider failure is fatal to
//! the invocation: no retry, no partial application. Callers re-invoke with
//! the same desired state; the check-before-act pattern makes that safe.

use crate::config::{DesiredRecord, RecordState};
use crate::error::Result;
use crate::traits::{A_RECORD, RecordProvider};
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// Result of a single reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The record did not exist and was created
    Created {
        /// The record name
        domain: String,
        /// The address it now points to
        address: Ipv4Addr,
    },
    /// The record existed and was deleted
    Deleted {
        /// The record name
        domain: String,
    },
    /// The provider already matched the desired state (no-op)
    Unchanged {
        /// The record name
        domain: String,
        /// Whether the record exists at the provider
        exists: bool,
    },
}

impl ReconcileOutcome {
    /// Whether this reconciliation mutated the provider
    pub fn changed(&self) -> bool {
        !matches!(self, ReconcileOutcome::Unchanged { .. })
    }
}

/// Idempotent DNS record reconciler
///
/// Given a desired "A" record and a desired presence state, determines and
/// performs the minimal action needed to make the record provider match,
/// reporting whether any mutation occurred.
///
/// ## Matching
///
/// A record exists iff the provider lists a record whose `name` equals the
/// desired domain exactly. No wildcard or suffix matching.
///
/// ## Statelessness
///
/// The reconciler holds no state between invocations: each call is
/// independent and idempotent given the same provider state. Repeated
/// invocations with unchanged desired state never create duplicate records
/// or report spurious changes.
pub struct Reconciler {
    /// Record provider client executing the actual operations
    provider: Box<dyn RecordProvider>,
}

impl Reconciler {
    /// Create a new reconciler around a record provider client
    pub fn new(provider: Box<dyn RecordProvider>) -> Self {
        Self { provider }
    }

    /// Converge the provider toward the desired state
    ///
    /// # Parameters
    ///
    /// - `desired`: The declarative target state for one "A" record
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileOutcome)`: What happened (`changed()` tells whether
    ///   the provider was mutated)
    /// - `Err(Error)`: A provider call failed; nothing further was attempted
    pub async fn reconcile(&self, desired: &DesiredRecord) -> Result<ReconcileOutcome> {
        desired.validate()?;

        debug!(
            "Reconciling {} ({} -> {:?}) via provider {}",
            desired.domain,
            desired.address,
            desired.state,
            self.provider.provider_name()
        );

        // List first. A failure here is terminal and nothing is mutated.
        let existing = self.provider.list(&desired.domain).await?;

        let exists = existing.iter().any(|record| record.name == desired.domain);
        debug!(
            "Provider lists {} record(s) for {}, exact match: {}",
            existing.len(),
            desired.domain,
            exists
        );

        match desired.state {
            RecordState::Present => {
                if exists {
                    debug!("Record {} already present, nothing to do", desired.domain);
                    return Ok(ReconcileOutcome::Unchanged {
                        domain: desired.domain.clone(),
                        exists: true,
                    });
                }

                self.provider
                    .create(&desired.domain, A_RECORD, &desired.address.to_string())
                    .await?;

                info!("Created record {} -> {}", desired.domain, desired.address);
                Ok(ReconcileOutcome::Created {
                    domain: desired.domain.clone(),
                    address: desired.address,
                })
            }
            RecordState::Absent => {
                if !exists {
                    debug!("Record {} already absent, nothing to do", desired.domain);
                    return Ok(ReconcileOutcome::Unchanged {
                        domain: desired.domain.clone(),
                        exists: false,
                    });
                }

                self.provider
                    .delete(&desired.domain, A_RECORD, &desired.address.to_string())
                    .await?;

                info!("Deleted record {}", desired.domain);
                Ok(ReconcileOutcome::Deleted {
                    domain: desired.domain.clone(),
                })
            }
        }
    }
}
