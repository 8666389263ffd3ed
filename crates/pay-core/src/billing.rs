//! Billing input record passed through to the payment gateway.

use serde::{Deserialize, Serialize};

/// Billing details collected by the wizard's card-entry step.
///
/// Opaque to the flow: it is handed to the gateway port unmodified and is
/// never validated or mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub name: String,
    pub address: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}
