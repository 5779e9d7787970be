// # gandi-dns-core
//
// Core library for declarative Gandi DNS record reconciliation.
//
// ## Architecture Overview
//
// This library provides the core functionality for converging one DNS "A"
// record toward a declared desired state:
//
// - **RecordProvider**: Trait for executing list/create/delete operations
//   against the DNS host
// - **Reconciler**: Core check-before-act logic that decides and performs
//   the minimal mutation and reports changed/unchanged
// - **ProviderRegistry**: Plugin-based registry for record providers
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Reconciliation logic is separate from the
//    subprocess/transport plumbing of any particular provider
// 2. **Idempotency**: Repeated application of the same desired state
//    produces no further changes after the first successful application
// 3. **Stateless**: No persisted state; each invocation lists the provider
//    and acts on what it finds
// 4. **Library-First**: The reconciler is fully testable with in-memory
//    fakes, with zero process spawning

pub mod config;
pub mod error;
pub mod reconciler;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::{DesiredRecord, ProviderConfig, RecordState};
pub use error::{Error, Result};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use registry::ProviderRegistry;
pub use traits::{A_RECORD, ExistingRecord, RecordProvider, RecordProviderFactory};
