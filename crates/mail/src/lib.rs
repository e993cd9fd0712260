//! # TableBook Mail
//!
//! [`Notifier`](tablebook_core::notify::Notifier) implementations that reach
//! the restaurant by email.
//!
//! - [`smtp::SmtpNotifier`] sends through an authenticated STARTTLS relay.
//! - [`disabled::DisabledNotifier`] stands in when no credentials are
//!   configured and reports every delivery as failed.

pub mod config;
pub mod disabled;
pub mod mock;
pub mod smtp;

use std::sync::Arc;

use eyre::Result;
use tablebook_core::notify::Notifier;
use tracing::{info, warn};

pub use config::MailConfig;
pub use disabled::DisabledNotifier;
pub use smtp::SmtpNotifier;

/// Builds the notifier for the given configuration. `None` yields a
/// [`DisabledNotifier`].
pub fn notifier_from_config(config: Option<&MailConfig>) -> Result<Arc<dyn Notifier>> {
    match config {
        Some(config) => {
            info!(
                "Email notifications enabled via {}:{} to {}",
                config.smtp_host, config.smtp_port, config.recipient
            );
            Ok(Arc::new(SmtpNotifier::new(config)?))
        }
        None => {
            warn!("EMAIL_USER and EMAIL_PASS not set; email notifications are disabled");
            Ok(Arc::new(DisabledNotifier))
        }
    }
}
