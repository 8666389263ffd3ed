//! Payment flow orchestration layer.
//!
//! This crate drives the pure state machine in `pay-core` with real timers
//! and the payment gateway.

pub mod usecases;

pub use usecases::payment_setup::{PaymentSetupError, PaymentSetupFlow};
