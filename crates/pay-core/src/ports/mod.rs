//! Port interfaces for the application layer.
//!
//! Ports define the contract between the flow logic and the collaborators
//! owned by the surrounding wizard: the payment gateway, wizard navigation
//! and the presentational event sink.

mod flow_event;
mod navigation;
mod payment_gateway;

pub use flow_event::PaymentFlowEventPort;
pub use navigation::WizardNavigationPort;
pub use payment_gateway::{PaymentGatewayPort, SubmitOutcome};
