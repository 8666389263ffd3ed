//! # pay-core
//!
//! Core domain model for the payment setup flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod billing;
pub mod flow;
pub mod ports;

// Re-export commonly used types at the crate root
pub use billing::BillingDetails;
pub use flow::view::{IconMessage, PaymentStepIcon, PaymentStepView, ViewAction};
pub use flow::{
    FlowState, PaymentFlowAction, PaymentFlowEvent, PaymentFlowPolicy, PaymentFlowStateMachine,
    ProcessState,
};
