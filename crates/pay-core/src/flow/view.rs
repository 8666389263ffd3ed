//! Per-state view projection for the payment setup flow.
//!
//! The flow renders nothing itself: it produces declarative view
//! descriptors that the presentational layer (an icon-and-message panel
//! owned by the wizard) turns into pixels. Titles, subtitles and button
//! labels are i18n message ids; icon variants map to shipped svg assets.

use serde::{Deserialize, Serialize};

use super::state_machine::{FlowState, ProcessState};

pub const MSG_VERIFY_PAYMENT_INFORMATION: &str =
    "admin.billing.subscription.verifyPaymentInformation";
pub const MSG_UPGRADED_SUCCESS: &str = "admin.billing.subscription.upgradedSuccess";
pub const MSG_LETS_GO: &str = "admin.billing.subscription.letsGo";
pub const MSG_PAYMENT_VERIFICATION_FAILED: &str =
    "admin.billing.subscription.paymentVerificationFailed";
pub const MSG_PAYMENT_FAILED: &str = "admin.billing.subscription.paymentFailed";
pub const MSG_GO_BACK_TRY_AGAIN: &str = "admin.billing.subscription.goBackTryAgain";
pub const MSG_CONTACT_SUPPORT: &str = "admin.billing.subscription.contactSupport";

/// Fixed promotional copy under the success headline.
pub const SUCCESS_SUBTITLE: &str = "You will be charged based on the number of enabled users";

/// Where the failure screen's secondary link sends the user.
pub const SUPPORT_TICKET_URL: &str = "https://support.payflow.dev/hc/requests/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStepIcon {
    Processing,
    Success,
    Failed,
}

impl PaymentStepIcon {
    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Processing => "images/cloud/processing_payment.svg",
            Self::Success => "images/cloud/payment_success.svg",
            Self::Failed => "images/cloud/payment_fail.svg",
        }
    }
}

/// Actions a rendered button hands back to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewAction {
    /// Dismiss the wizard (success primary button).
    CloseWizard,
    /// Go back and try again (failure primary button).
    RetryPayment,
}

/// Declarative view descriptor, one variant per [`ProcessState`].
///
/// Tagged per state so every variant carries exactly the fields its screen
/// needs; the `match` in [`PaymentStepView::for_state`] is exhaustive, so
/// an unrenderable state cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PaymentStepView {
    Processing {
        title: &'static str,
        /// Progress-bar fill percentage.
        progress: u8,
    },
    Success {
        title: &'static str,
        subtitle: &'static str,
        button_text: &'static str,
        button_action: ViewAction,
    },
    Failed {
        title: &'static str,
        subtitle: &'static str,
        /// Raw gateway message, retained for diagnostics. The rendered
        /// subtitle stays the static localized one.
        error_detail: String,
        button_text: &'static str,
        button_action: ViewAction,
        link_text: &'static str,
        link_url: &'static str,
    },
}

impl PaymentStepView {
    /// Projects the current flow state into its view descriptor.
    pub fn for_state(state: &FlowState) -> Self {
        match state.state {
            ProcessState::Processing => Self::Processing {
                title: MSG_VERIFY_PAYMENT_INFORMATION,
                progress: state.progress,
            },
            ProcessState::Success => Self::Success {
                title: MSG_UPGRADED_SUCCESS,
                subtitle: SUCCESS_SUBTITLE,
                button_text: MSG_LETS_GO,
                button_action: ViewAction::CloseWizard,
            },
            ProcessState::Failed => Self::Failed {
                title: MSG_PAYMENT_VERIFICATION_FAILED,
                subtitle: MSG_PAYMENT_FAILED,
                error_detail: state.error.clone(),
                button_text: MSG_GO_BACK_TRY_AGAIN,
                button_action: ViewAction::RetryPayment,
                link_text: MSG_CONTACT_SUPPORT,
                link_url: SUPPORT_TICKET_URL,
            },
        }
    }

    pub fn icon(&self) -> PaymentStepIcon {
        match self {
            Self::Processing { .. } => PaymentStepIcon::Processing,
            Self::Success { .. } => PaymentStepIcon::Success,
            Self::Failed { .. } => PaymentStepIcon::Failed,
        }
    }
}

/// Prop record accepted by the external icon-and-message panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconMessage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: PaymentStepIcon,
    pub error: bool,
    /// Progress-bar footer fill, present only while processing.
    pub footer_progress: Option<u8>,
    pub button_text: Option<&'static str>,
    pub button_action: Option<ViewAction>,
    pub link_text: Option<&'static str>,
    pub link_url: Option<&'static str>,
}

impl From<PaymentStepView> for IconMessage {
    fn from(view: PaymentStepView) -> Self {
        let icon = view.icon();
        match view {
            PaymentStepView::Processing { title, progress } => Self {
                title,
                subtitle: "",
                icon,
                error: false,
                footer_progress: Some(progress),
                button_text: None,
                button_action: None,
                link_text: None,
                link_url: None,
            },
            PaymentStepView::Success {
                title,
                subtitle,
                button_text,
                button_action,
            } => Self {
                title,
                subtitle,
                icon,
                error: false,
                footer_progress: None,
                button_text: Some(button_text),
                button_action: Some(button_action),
                link_text: None,
                link_url: None,
            },
            PaymentStepView::Failed {
                title,
                subtitle,
                button_text,
                button_action,
                link_text,
                link_url,
                ..
            } => Self {
                title,
                subtitle,
                icon,
                error: true,
                footer_progress: None,
                button_text: Some(button_text),
                button_action: Some(button_action),
                link_text: Some(link_text),
                link_url: Some(link_url),
            },
        }
    }
}
