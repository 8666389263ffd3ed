//! Payment setup state machine.
//!
//! Defines a pure state transition function for the payment-processing step
//! of the subscription upgrade wizard. The orchestrator in `pay-app` feeds
//! ticker, gateway and timer events in and executes the returned actions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum time, in milliseconds, the processing screen stays visible even
/// when the gateway answers instantly.
pub const MIN_PROCESSING_MILLIS: u64 = 5_000;

/// Cap for the synthetic progress percentage. The ticker never pushes the
/// bar past this value; only completion sets 100.
pub const MAX_FAKE_PROGRESS: u8 = 95;

/// Phase of the payment-processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Submission in flight, progress bar climbing.
    Processing,
    /// Payment method registered (terminal).
    Success,
    /// Gateway declined or errored. Retry re-enters `Processing`.
    Failed,
}

impl ProcessState {
    /// Check if this is a terminal state (no more transitions possible).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Check if the submission is still in flight.
    pub fn is_processing(self) -> bool {
        matches!(self, Self::Processing)
    }
}

impl Default for ProcessState {
    fn default() -> Self {
        Self::Processing
    }
}

/// Observable state of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    /// Synthetic progress percentage, 0..=100. Monotonically non-decreasing
    /// while `Processing`; forced to 100 on the transition to `Success`.
    pub progress: u8,
    /// Raw gateway error message. Empty unless `state == Failed`.
    pub error: String,
    pub state: ProcessState,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            progress: 0,
            error: String::new(),
            state: ProcessState::Processing,
        }
    }
}

/// Events that drive the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentFlowEvent {
    /// Progress ticker fired.
    Tick,
    /// Gateway accepted the payment method after `elapsed` of real time.
    SubmitSucceeded { elapsed: Duration },
    /// Gateway declined the payment method.
    SubmitFailed { message: String },
    /// The one-shot minimum-duration timer fired.
    MinDurationElapsed,
    /// User pressed the try-again button on the failure screen.
    Retry,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentFlowAction {
    /// Cancel the repeating progress ticker.
    StopTicker,
    /// Arm a one-shot timer that dispatches
    /// [`PaymentFlowEvent::MinDurationElapsed`] after `delay`.
    ScheduleCompletion { delay: Duration },
    /// Hand control back to the parent wizard. The parent remounts the
    /// flow, which restarts the submission.
    NavigateBack,
}

/// Timing policy for the flow.
#[derive(Debug, Clone)]
pub struct PaymentFlowPolicy {
    /// Minimum time the processing screen stays visible.
    pub min_processing: Duration,
    /// Progress percentage the ticker saturates at.
    pub max_fake_progress: u8,
}

impl Default for PaymentFlowPolicy {
    fn default() -> Self {
        Self {
            min_processing: Duration::from_millis(MIN_PROCESSING_MILLIS),
            max_fake_progress: MAX_FAKE_PROGRESS,
        }
    }
}

impl PaymentFlowPolicy {
    /// Ticker period, chosen so the bar reaches the cap exactly when the
    /// minimum display window closes.
    pub fn tick_interval(&self) -> Duration {
        self.min_processing / u32::from(self.max_fake_progress.max(1))
    }
}

/// Pure payment flow state machine.
///
/// Holds only the timing policy; all state travels through
/// [`PaymentFlowStateMachine::transition`].
#[derive(Debug, Clone, Default)]
pub struct PaymentFlowStateMachine {
    policy: PaymentFlowPolicy,
}

impl PaymentFlowStateMachine {
    pub fn new(policy: PaymentFlowPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PaymentFlowPolicy {
        &self.policy
    }

    pub fn transition(
        &self,
        state: FlowState,
        event: PaymentFlowEvent,
    ) -> (FlowState, Vec<PaymentFlowAction>) {
        match (state.state, event) {
            (ProcessState::Processing, PaymentFlowEvent::Tick) => {
                if state.progress >= self.policy.max_fake_progress {
                    // Saturated: the ticker has nothing left to do.
                    return (state, vec![PaymentFlowAction::StopTicker]);
                }
                let progress = (state.progress + 1).min(self.policy.max_fake_progress);
                (FlowState { progress, ..state }, Vec::new())
            }
            (ProcessState::Processing, PaymentFlowEvent::SubmitFailed { message }) => (
                // Progress freezes at whatever value the ticker reached.
                FlowState {
                    error: message,
                    state: ProcessState::Failed,
                    ..state
                },
                Vec::new(),
            ),
            (ProcessState::Processing, PaymentFlowEvent::SubmitSucceeded { elapsed }) => {
                if elapsed >= self.policy.min_processing {
                    return Self::complete(state);
                }
                // Keep the processing screen up for the remainder of the
                // minimum display window.
                let delay = self.policy.min_processing - elapsed;
                (state, vec![PaymentFlowAction::ScheduleCompletion { delay }])
            }
            (ProcessState::Processing, PaymentFlowEvent::MinDurationElapsed) => {
                Self::complete(state)
            }
            (ProcessState::Failed, PaymentFlowEvent::Retry) => (
                FlowState::default(),
                vec![
                    PaymentFlowAction::StopTicker,
                    PaymentFlowAction::NavigateBack,
                ],
            ),
            (_state, _event) => (state, Vec::new()),
        }
    }

    fn complete(state: FlowState) -> (FlowState, Vec<PaymentFlowAction>) {
        (
            FlowState {
                progress: 100,
                state: ProcessState::Success,
                ..state
            },
            vec![PaymentFlowAction::StopTicker],
        )
    }
}
