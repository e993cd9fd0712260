use async_trait::async_trait;
use eyre::Result;

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Delivers notifications to the restaurant's fixed recipient.
///
/// Implementations report delivery failure through the returned error; they
/// must not panic when the relay is unreachable or unconfigured.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Sends `notification` through `notifier`.
pub async fn dispatch(notifier: &dyn Notifier, notification: &Notification) -> Result<()> {
    notifier
        .notify(&notification.subject, &notification.body)
        .await
}
