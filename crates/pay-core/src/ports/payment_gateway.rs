use crate::billing::BillingDetails;

/// Outcome of a payment-method submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The gateway registered the payment method.
    Accepted,
    /// The gateway rejected the payment method with a human-readable reason.
    Declined { message: String },
}

/// Registers payment methods with the billing provider.
///
/// The adapter owns the provider handle (client, API keys); the flow only
/// passes the billing record through, unvalidated. No timeout is imposed
/// here: a hung submission leaves the flow holding at its progress cap.
#[async_trait::async_trait]
pub trait PaymentGatewayPort: Send + Sync {
    async fn submit_payment_method(
        &self,
        billing: Option<&BillingDetails>,
    ) -> anyhow::Result<SubmitOutcome>;
}
