use crate::flow::FlowState;

/// Sink for flow state-change notifications, implemented by the
/// presentational layer.
#[async_trait::async_trait]
pub trait PaymentFlowEventPort: Send + Sync {
    async fn emit_flow_state_changed(&self, state: FlowState);
}
