//! Contract Test: Idempotency
//!
//! This test verifies that reconciling the same desired state twice in
//! succession, against a provider that reflects the effect of the first
//! call, yields changed=true then changed=false with exactly one mutation.
//!
//! If this test fails, repeated runs with unchanged desired state would
//! create duplicate records or report spurious changes.

mod common;

use common::*;
use gandi_dns_core::traits::ExistingRecord;
use gandi_dns_core::{DesiredRecord, Reconciler, RecordState};
use std::net::Ipv4Addr;

fn desired(state: RecordState) -> DesiredRecord {
    DesiredRecord::new("foo.example.com", Ipv4Addr::new(192, 168, 1, 2), state)
        .expect("valid desired record")
}

#[tokio::test]
async fn repeated_present_converges_after_first_apply() {
    let provider = InMemoryProvider::empty();
    let state = InMemoryProvider::sharing_state_with(&provider);

    let reconciler = Reconciler::new(Box::new(provider));
    let desired = desired(RecordState::Present);

    let first = reconciler.reconcile(&desired).await.unwrap();
    assert!(first.changed(), "first apply must create the record");

    let second = reconciler.reconcile(&desired).await.unwrap();
    assert!(!second.changed(), "second apply must be a no-op");

    assert_eq!(state.mutation_count(), 1, "exactly one mutation overall");
    assert_eq!(state.record_names(), vec!["foo.example.com".to_string()]);
}

#[tokio::test]
async fn repeated_absent_converges_after_first_apply() {
    let provider =
        InMemoryProvider::with_records(vec![ExistingRecord::named("foo.example.com")]);
    let state = InMemoryProvider::sharing_state_with(&provider);

    let reconciler = Reconciler::new(Box::new(provider));
    let desired = desired(RecordState::Absent);

    let first = reconciler.reconcile(&desired).await.unwrap();
    assert!(first.changed(), "first apply must delete the record");

    let second = reconciler.reconcile(&desired).await.unwrap();
    assert!(!second.changed(), "second apply must be a no-op");

    assert_eq!(state.mutation_count(), 1);
    assert!(state.record_names().is_empty());
}

#[tokio::test]
async fn present_then_absent_round_trip() {
    let provider = InMemoryProvider::empty();
    let state = InMemoryProvider::sharing_state_with(&provider);

    let reconciler = Reconciler::new(Box::new(provider));

    assert!(
        reconciler
            .reconcile(&desired(RecordState::Present))
            .await
            .unwrap()
            .changed()
    );
    assert!(
        reconciler
            .reconcile(&desired(RecordState::Absent))
            .await
            .unwrap()
            .changed()
    );
    assert!(
        !reconciler
            .reconcile(&desired(RecordState::Absent))
            .await
            .unwrap()
            .changed()
    );

    assert_eq!(state.mutation_count(), 2, "create then delete, nothing more");
    assert!(state.record_names().is_empty());
}
