pub mod driver;
pub mod http;

pub use driver::{DeliveryOutcome, TransportDriver};
pub use http::HttpCollector;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use crate::types::Reading;

/// Body of the `/register` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The collector could not be reached at all.
    #[error("collector unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    /// The collector answered with a non-success status.
    #[error("collector rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// The seam between the delivery logic and the wire. `HttpCollector` is the
/// real thing; `MockCollector` scripts outcomes for tests.
#[async_trait]
pub trait Collector: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), TransportError>;
    async fn update(&self, reading: &Reading) -> Result<(), TransportError>;
}

// Mock collector for testing
#[derive(Default)]
pub struct MockCollector {
    register_calls: AtomicUsize,
    update_calls: AtomicUsize,
    register_script: Mutex<VecDeque<Result<(), TransportError>>>,
    update_script: Mutex<VecDeque<Result<(), TransportError>>>,
}

impl MockCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next `register` call. Calls beyond the
    /// scripted ones succeed.
    pub fn script_register(&self, outcome: Result<(), TransportError>) {
        self.register_script.lock().unwrap().push_back(outcome);
    }

    /// Queue the outcome of the next `update` call. Calls beyond the
    /// scripted ones succeed.
    pub fn script_update(&self, outcome: Result<(), TransportError>) {
        self.update_script.lock().unwrap().push_back(outcome);
    }

    pub fn rejected(status: u16, body: &str) -> TransportError {
        TransportError::Rejected {
            status,
            body: body.to_string(),
        }
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Collector for MockCollector {
    async fn register(&self, _request: &RegistrationRequest) -> Result<(), TransportError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.register_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn update(&self, _reading: &Reading) -> Result<(), TransportError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.update_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}
