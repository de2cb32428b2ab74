//! Shared application state.
//!
//! Holds the read-only configuration and the mail transport. There is no
//! per-order state: each request owns its submission until it responds.

use std::sync::Arc;

use crate::{config::Config, mail::Mailer};

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Configuration read at startup.
    pub config: Arc<Config>,
    /// Transport for order notifications.
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
        }
    }
}
