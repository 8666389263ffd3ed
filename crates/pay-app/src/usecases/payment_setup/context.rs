use std::sync::Arc;

use tokio::sync::Mutex;

use pay_core::flow::FlowState;

/// Shared flow context containing state and dispatch lock.
///
/// Shared between `PaymentSetupFlow` and the tasks it spawns so state
/// reads and transitions stay consistent.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: Used only for `dispatch` operations to serialize concurrent calls.
/// - `state`: Used for both reading (`get_state`) and writing (during `dispatch`).
#[derive(Clone)]
pub struct FlowContext {
    /// Current flow state.
    state: Arc<Mutex<FlowState>>,
    /// Serializes dispatch calls to prevent concurrent state/action races.
    /// Ensures the entire transition + action execution + state update runs
    /// atomically. Only acquired during `dispatch`, NOT during `get_state`.
    dispatch_lock: Arc<Mutex<()>>,
}

impl FlowContext {
    /// Creates a new FlowContext with the given initial state.
    pub fn new(initial_state: FlowState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a clone of the current state.
    ///
    /// This is a lightweight read operation that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> FlowState {
        self.state.lock().await.clone()
    }

    /// Acquires the dispatch lock for serializing concurrent dispatch calls.
    ///
    /// Returns a guard that releases the lock when dropped.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Updates the state to the given value.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: FlowState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for FlowContext {
    /// Fresh mount: zero progress, no error, processing.
    fn default() -> Self {
        Self::new(FlowState::default())
    }
}
