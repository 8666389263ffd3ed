//! Payment setup flow domain module.
//!
//! Defines the payment-processing state machine and its view projection.

pub mod state_machine;
pub mod view;

pub use state_machine::{
    FlowState, PaymentFlowAction, PaymentFlowEvent, PaymentFlowPolicy, PaymentFlowStateMachine,
    ProcessState, MAX_FAKE_PROGRESS, MIN_PROCESSING_MILLIS,
};
