//! Core traits for the reconciliation system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`RecordProvider`]: Execute list/create/delete operations against the DNS host

pub mod record_provider;

pub use record_provider::{ExistingRecord, RecordProvider, RecordProviderFactory, A_RECORD};
