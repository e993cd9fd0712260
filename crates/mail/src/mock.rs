use async_trait::async_trait;
use mockall::mock;

// Mock notifier for testing
mock! {
    pub Notifier {}

    #[async_trait]
    impl tablebook_core::notify::Notifier for Notifier {
        async fn notify(&self, subject: &str, body: &str) -> eyre::Result<()>;
    }
}
