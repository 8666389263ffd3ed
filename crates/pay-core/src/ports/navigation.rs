/// Navigation callbacks owned by the parent wizard.
///
/// Fire-and-forget: the flow invokes these and never inspects a result.
#[async_trait::async_trait]
pub trait WizardNavigationPort: Send + Sync {
    /// Return to the previous wizard step (card entry).
    async fn go_back(&self);
    /// Dismiss the wizard.
    async fn close(&self);
}
