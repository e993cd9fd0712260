use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tablebook_core::notify::Notifier;
use tracing::{error, info};

use crate::config::MailConfig;

/// Sends plain-text notifications through an authenticated STARTTLS relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    /// Validates addresses and prepares the transport. No connection is
    /// made until the first message is sent.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let from: Mailbox = config
            .username
            .parse()
            .wrap_err("EMAIL_USER is not a valid email address")?;
        let to: Mailbox = config
            .recipient
            .parse()
            .wrap_err("NOTIFY_RECIPIENT is not a valid email address")?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .wrap_err_with(|| format!("Invalid SMTP relay host: {}", config.smtp_host))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        Ok(Self { transport, from, to })
    }

    pub fn message(&self, subject: &str, body: &str) -> Result<Message> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .wrap_err("Failed to build email message")?;

        Ok(message)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let message = self.message(subject, body)?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!("Email sent successfully: '{}'", subject);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send email '{}': {}", subject, e);
                Err(e).wrap_err("Failed to send email")
            }
        }
    }
}
