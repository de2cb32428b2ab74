//! Mailer doubles for tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use printorder_core::order::DeliveryError;

use super::{Email, Mailer};

/// Accepts every email and keeps a copy.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .expect("mailer lock poisoned")
            .push(email.clone());
        Ok(())
    }
}

/// Rejects every email with the same error and counts attempts.
pub struct FailingMailer {
    error: DeliveryError,
    attempts: AtomicUsize,
}

impl FailingMailer {
    pub fn new(error: DeliveryError) -> Self {
        Self {
            error,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &Email) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Never completes a send.
pub struct StalledMailer;

#[async_trait]
impl Mailer for StalledMailer {
    async fn send(&self, _email: &Email) -> Result<(), DeliveryError> {
        std::future::pending().await
    }
}
