//! Payment setup use case.

pub mod context;
pub mod orchestrator;

pub use context::FlowContext;
pub use orchestrator::{PaymentSetupError, PaymentSetupFlow};
