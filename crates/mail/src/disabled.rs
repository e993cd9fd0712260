use async_trait::async_trait;
use eyre::{Result, eyre};
use tablebook_core::notify::Notifier;
use tracing::warn;

/// Notifier used when no relay credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, subject: &str, _body: &str) -> Result<()> {
        warn!("Email credentials not set; dropping notification '{}'", subject);
        Err(eyre!("Email credentials not set"))
    }
}
