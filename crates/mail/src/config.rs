//! # Mail Configuration
//!
//! Relay settings are read once at startup.
//!
//! - `EMAIL_USER`: sender address and SMTP login
//! - `EMAIL_PASS`: SMTP password
//! - `SMTP_HOST`: relay host (default: "smtp.gmail.com")
//! - `SMTP_PORT`: relay port, STARTTLS (default: 587)
//! - `SMTP_TIMEOUT_SECONDS`: connection timeout (default: 10)
//! - `NOTIFY_RECIPIENT`: where notifications go (default: `EMAIL_USER`)
//!
//! With neither credential set, notifications are disabled. Setting only one
//! of them is a configuration error.

use eyre::{Result, WrapErr, eyre};
use std::env;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SMTP_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone)]
pub struct MailConfig {
    pub username: String,
    pub password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub timeout_seconds: u64,
    pub recipient: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl MailConfig {
    /// Loads relay settings from the process environment.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads relay settings through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (username, password) = match (get("EMAIL_USER"), get("EMAIL_PASS")) {
            (None, None) => return Ok(None),
            (Some(user), Some(pass)) => (user, pass),
            (Some(_), None) => return Err(eyre!("EMAIL_PASS must be set when EMAIL_USER is")),
            (None, Some(_)) => return Err(eyre!("EMAIL_USER must be set when EMAIL_PASS is")),
        };

        let smtp_host = get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = match get("SMTP_PORT") {
            Some(port) => port.parse().wrap_err("Invalid SMTP_PORT value")?,
            None => DEFAULT_SMTP_PORT,
        };
        let timeout_seconds = match get("SMTP_TIMEOUT_SECONDS") {
            Some(seconds) => seconds
                .parse()
                .wrap_err("Invalid SMTP_TIMEOUT_SECONDS value")?,
            None => DEFAULT_SMTP_TIMEOUT_SECONDS,
        };
        let recipient = get("NOTIFY_RECIPIENT").unwrap_or_else(|| username.clone());

        Ok(Some(Self {
            username,
            password,
            smtp_host,
            smtp_port,
            timeout_seconds,
            recipient,
        }))
    }
}
