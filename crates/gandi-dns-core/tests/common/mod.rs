//! Test doubles and common utilities for reconciliation contract tests
//!
//! This module provides minimal test doubles that verify the reconciler's
//! contract without spawning any external process.

use async_trait::async_trait;
use gandi_dns_core::error::{Error, Result};
use gandi_dns_core::traits::{ExistingRecord, RecordProvider};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A scripted RecordProvider that returns fixed list responses and tracks calls
pub struct ScriptedProvider {
    /// Records returned by every list() call
    list_response: Vec<ExistingRecord>,
    /// Whether list() should fail
    fail_list: bool,
    /// Whether create() should fail
    fail_create: bool,
    /// Whether delete() should fail
    fail_delete: bool,
    /// Call counter for list()
    list_call_count: Arc<AtomicUsize>,
    /// Call counter for create()
    create_call_count: Arc<AtomicUsize>,
    /// Call counter for delete()
    delete_call_count: Arc<AtomicUsize>,
    /// Recorded (domain, record_type, content) triples from create calls
    create_calls: Arc<Mutex<Vec<(String, String, String)>>>,
    /// Recorded (domain, record_type, content) triples from delete calls
    delete_calls: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl ScriptedProvider {
    pub fn listing(records: Vec<ExistingRecord>) -> Self {
        Self {
            list_response: records,
            fail_list: false,
            fail_create: false,
            fail_delete: false,
            list_call_count: Arc::new(AtomicUsize::new(0)),
            create_call_count: Arc::new(AtomicUsize::new(0)),
            delete_call_count: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(Mutex::new(Vec::new())),
            delete_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose list() always fails
    pub fn failing_list() -> Self {
        let mut provider = Self::listing(Vec::new());
        provider.fail_list = true;
        provider
    }

    /// A provider whose create() fails after a successful list()
    pub fn failing_create(records: Vec<ExistingRecord>) -> Self {
        let mut provider = Self::listing(records);
        provider.fail_create = true;
        provider
    }

    /// A provider whose delete() fails after a successful list()
    pub fn failing_delete(records: Vec<ExistingRecord>) -> Self {
        let mut provider = Self::listing(records);
        provider.fail_delete = true;
        provider
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_call_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> Vec<(String, String, String)> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<(String, String, String)> {
        self.delete_calls.lock().unwrap().clone()
    }

    /// Create a new ScriptedProvider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            list_response: other.list_response.clone(),
            fail_list: other.fail_list,
            fail_create: other.fail_create,
            fail_delete: other.fail_delete,
            list_call_count: Arc::clone(&other.list_call_count),
            create_call_count: Arc::clone(&other.create_call_count),
            delete_call_count: Arc::clone(&other.delete_call_count),
            create_calls: Arc::clone(&other.create_calls),
            delete_calls: Arc::clone(&other.delete_calls),
        }
    }
}

#[async_trait]
impl RecordProvider for ScriptedProvider {
    async fn list(&self, domain: &str) -> Result<Vec<ExistingRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(Error::provider(
                "scripted",
                "list",
                domain,
                "scripted failure",
            ));
        }
        Ok(self.list_response.clone())
    }

    async fn create(&self, domain: &str, record_type: &str, content: &str) -> Result<()> {
        self.create_call_count.fetch_add(1, Ordering::SeqCst);
        self.create_calls.lock().unwrap().push((
            domain.to_string(),
            record_type.to_string(),
            content.to_string(),
        ));
        if self.fail_create {
            return Err(Error::provider(
                "scripted",
                "create",
                domain,
                "scripted failure",
            ));
        }
        Ok(())
    }

    async fn delete(&self, domain: &str, record_type: &str, content: &str) -> Result<()> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);
        self.delete_calls.lock().unwrap().push((
            domain.to_string(),
            record_type.to_string(),
            content.to_string(),
        ));
        if self.fail_delete {
            return Err(Error::provider(
                "scripted",
                "delete",
                domain,
                "scripted failure",
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// An in-memory RecordProvider whose list() reflects prior mutations
///
/// Models the remote provider faithfully enough to verify idempotence:
/// create() adds a record, delete() removes it, list() returns what is
/// currently stored.
pub struct InMemoryProvider {
    records: Arc<Mutex<Vec<ExistingRecord>>>,
    mutation_count: Arc<AtomicUsize>,
}

impl InMemoryProvider {
    pub fn empty() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<ExistingRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            mutation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.mutation_count.load(Ordering::SeqCst)
    }

    pub fn record_names(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    /// Create a new InMemoryProvider that shares storage with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            records: Arc::clone(&other.records),
            mutation_count: Arc::clone(&other.mutation_count),
        }
    }
}

#[async_trait]
impl RecordProvider for InMemoryProvider {
    async fn list(&self, domain: &str) -> Result<Vec<ExistingRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.name == domain)
            .cloned()
            .collect())
    }

    async fn create(&self, domain: &str, record_type: &str, content: &str) -> Result<()> {
        self.mutation_count.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(ExistingRecord {
            id: None,
            rtype: Some(record_type.to_string()),
            name: domain.to_string(),
            ttl: Some(10800),
            content: Some(content.to_string()),
        });
        Ok(())
    }

    async fn delete(&self, domain: &str, _record_type: &str, _content: &str) -> Result<()> {
        self.mutation_count.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().retain(|r| r.name != domain);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "in-memory"
    }
}
