//! Payment setup orchestrator.
//!
//! Drives the pure payment flow state machine with real timers and the
//! payment gateway: a repeating ticker advances the synthetic progress bar
//! while the submission runs, and a one-shot timer enforces the minimum
//! display duration before the success screen appears.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{sleep, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, warn, Instrument};

use pay_core::flow::view::PaymentStepView;
use pay_core::flow::{
    FlowState, PaymentFlowAction, PaymentFlowEvent, PaymentFlowPolicy, PaymentFlowStateMachine,
};
use pay_core::ports::{
    PaymentFlowEventPort, PaymentGatewayPort, SubmitOutcome, WizardNavigationPort,
};
use pay_core::BillingDetails;

use super::context::FlowContext;

/// Errors produced by the payment setup orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum PaymentSetupError {
    #[error("payment setup flow already started")]
    AlreadyStarted,
}

/// Orchestrator for the payment-processing step of the upgrade wizard.
///
/// A cloneable handle over shared state; one instance corresponds to one
/// mounted flow. [`PaymentSetupFlow::start`] kicks off the submission and
/// the progress ticker, [`PaymentSetupFlow::stop`] tears both down and
/// suppresses any continuation still in flight.
#[derive(Clone)]
pub struct PaymentSetupFlow {
    machine: PaymentFlowStateMachine,
    context: FlowContext,
    billing: Arc<Option<BillingDetails>>,

    gateway: Arc<dyn PaymentGatewayPort>,
    navigation: Arc<dyn WizardNavigationPort>,
    events: Arc<dyn PaymentFlowEventPort>,

    /// False once `stop` ran; every continuation checks this before
    /// touching state.
    alive: Arc<AtomicBool>,
    started: Arc<AtomicBool>,
    tasks: Arc<Mutex<FlowTasks>>,
}

#[derive(Default)]
struct FlowTasks {
    ticker: Option<AbortHandle>,
    submission: Option<AbortHandle>,
    completion: Option<AbortHandle>,
}

impl PaymentSetupFlow {
    pub fn new(
        policy: PaymentFlowPolicy,
        billing: Option<BillingDetails>,
        gateway: Arc<dyn PaymentGatewayPort>,
        navigation: Arc<dyn WizardNavigationPort>,
        events: Arc<dyn PaymentFlowEventPort>,
    ) -> Self {
        Self {
            machine: PaymentFlowStateMachine::new(policy),
            context: FlowContext::default(),
            billing: Arc::new(billing),
            gateway,
            navigation,
            events,
            alive: Arc::new(AtomicBool::new(true)),
            started: Arc::new(AtomicBool::new(false)),
            tasks: Arc::new(Mutex::new(FlowTasks::default())),
        }
    }

    /// Activates the flow: kicks off the submission and the progress ticker.
    ///
    /// Once per mounted instance; a second call is rejected.
    pub async fn start(&self) -> Result<(), PaymentSetupError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(PaymentSetupError::AlreadyStarted);
        }
        info!("payment setup flow started");

        let mut tasks = self.tasks.lock().await;
        tasks.submission = Some(self.spawn_submission());
        tasks.ticker = Some(self.spawn_ticker());
        Ok(())
    }

    /// Deactivates the flow. Idempotent.
    ///
    /// Flips the liveness flag before aborting the tasks so a continuation
    /// that already passed its abort point still refuses to mutate state.
    pub async fn stop(&self) {
        if !self.alive.swap(false, Ordering::SeqCst) {
            return;
        }
        let mut tasks = self.tasks.lock().await;
        for handle in [
            tasks.ticker.take(),
            tasks.submission.take(),
            tasks.completion.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
        info!("payment setup flow stopped");
    }

    /// User pressed the try-again button on the failure screen.
    pub async fn retry(&self) {
        self.dispatch(PaymentFlowEvent::Retry).await;
    }

    /// User pressed the primary button on the success screen.
    pub async fn close(&self) {
        self.navigation.close().await;
    }

    /// Current observable state.
    pub async fn state(&self) -> FlowState {
        self.context.get_state().await
    }

    /// View descriptor for the current state.
    pub async fn view(&self) -> PaymentStepView {
        PaymentStepView::for_state(&self.context.get_state().await)
    }

    fn alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn spawn_ticker(&self) -> AbortHandle {
        let flow = self.clone();
        let period = self.machine.policy().tick_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            // The first tick of a tokio interval completes immediately;
            // consume it so the first increment lands one period in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !flow.alive() {
                    break;
                }
                flow.dispatch(PaymentFlowEvent::Tick).await;
            }
        })
        .abort_handle()
    }

    fn spawn_submission(&self) -> AbortHandle {
        let flow = self.clone();
        tokio::spawn(async move {
            let started_at = Instant::now();
            let outcome = flow
                .gateway
                .submit_payment_method(flow.billing.as_ref().as_ref())
                .await;
            let event = match outcome {
                Ok(SubmitOutcome::Accepted) => PaymentFlowEvent::SubmitSucceeded {
                    elapsed: started_at.elapsed(),
                },
                Ok(SubmitOutcome::Declined { message }) => {
                    PaymentFlowEvent::SubmitFailed { message }
                }
                Err(err) => {
                    // Transport-level failures surface exactly like declines.
                    warn!(error = %err, "payment gateway submission errored");
                    PaymentFlowEvent::SubmitFailed {
                        message: err.to_string(),
                    }
                }
            };
            flow.dispatch(event).await;
        })
        .abort_handle()
    }

    // Returns a boxed future to break the `dispatch` -> `execute_actions` ->
    // `schedule_completion` -> spawned task -> `dispatch` auto-trait cycle
    // that otherwise leaves the compiler unable to prove `Send`.
    fn dispatch(
        &self,
        event: PaymentFlowEvent,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        let span = info_span!("usecase.payment_setup.dispatch", event = ?event);
        Box::pin(
            async {
                if !self.alive() {
                    return;
                }
                let _guard = self.context.acquire_dispatch_lock().await;
                // stop() may have landed while we waited for the lock.
                if !self.alive() {
                    return;
                }

                let current = self.context.get_state().await;
                let (next, actions) = self.machine.transition(current.clone(), event);
                if next != current {
                    debug!(
                        from = ?current.state,
                        to = ?next.state,
                        progress = next.progress,
                        "payment flow transition"
                    );
                    self.context.set_state(next.clone()).await;
                    self.events.emit_flow_state_changed(next).await;
                }
                self.execute_actions(actions).await;
            }
            .instrument(span),
        )
    }

    async fn execute_actions(&self, actions: Vec<PaymentFlowAction>) {
        for action in actions {
            debug!(?action, "payment flow executing action");
            match action {
                PaymentFlowAction::StopTicker => {
                    if let Some(handle) = self.tasks.lock().await.ticker.take() {
                        handle.abort();
                    }
                }
                PaymentFlowAction::ScheduleCompletion { delay } => {
                    self.schedule_completion(delay).await;
                }
                PaymentFlowAction::NavigateBack => {
                    self.navigation.go_back().await;
                }
            }
        }
    }

    /// Arms the one-shot minimum-duration timer, replacing any pending one.
    async fn schedule_completion(&self, delay: Duration) {
        let flow = self.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            flow.dispatch(PaymentFlowEvent::MinDurationElapsed).await;
        })
        .abort_handle();

        let mut tasks = self.tasks.lock().await;
        if let Some(existing) = tasks.completion.replace(handle) {
            existing.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use pay_core::ProcessState;

    mock! {
        pub Navigation {}

        #[async_trait::async_trait]
        impl WizardNavigationPort for Navigation {
            async fn go_back(&self);
            async fn close(&self);
        }
    }

    mock! {
        pub Events {}

        #[async_trait::async_trait]
        impl PaymentFlowEventPort for Events {
            async fn emit_flow_state_changed(&self, state: FlowState);
        }
    }

    /// Gateway that never resolves within a test's virtual time.
    struct PendingGateway;

    #[async_trait::async_trait]
    impl PaymentGatewayPort for PendingGateway {
        async fn submit_payment_method(
            &self,
            _billing: Option<&BillingDetails>,
        ) -> anyhow::Result<SubmitOutcome> {
            sleep(Duration::from_secs(3_600)).await;
            Ok(SubmitOutcome::Accepted)
        }
    }

    fn flow_with(navigation: MockNavigation, events: MockEvents) -> PaymentSetupFlow {
        PaymentSetupFlow::new(
            PaymentFlowPolicy::default(),
            None,
            Arc::new(PendingGateway),
            Arc::new(navigation),
            Arc::new(events),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn retry_from_failure_resets_state_and_navigates_back_once() {
        let mut navigation = MockNavigation::new();
        navigation.expect_go_back().times(1).returning(|| ());
        navigation.expect_close().never();
        let mut events = MockEvents::new();
        events
            .expect_emit_flow_state_changed()
            .returning(|_state| ());

        let flow = flow_with(navigation, events);
        flow.dispatch(PaymentFlowEvent::SubmitFailed {
            message: "card_declined".to_string(),
        })
        .await;
        assert_eq!(flow.state().await.state, ProcessState::Failed);

        flow.retry().await;
        assert_eq!(flow.state().await, FlowState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn close_invokes_the_wizard_close_callback() {
        let mut navigation = MockNavigation::new();
        navigation.expect_close().times(1).returning(|| ());
        navigation.expect_go_back().never();
        let events = MockEvents::new();

        let flow = flow_with(navigation, events);
        flow.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_after_stop_is_suppressed() {
        let navigation = MockNavigation::new();
        let mut events = MockEvents::new();
        events.expect_emit_flow_state_changed().never();

        let flow = flow_with(navigation, events);
        flow.stop().await;
        flow.dispatch(PaymentFlowEvent::Tick).await;
        assert_eq!(flow.state().await, FlowState::default());
    }
}
