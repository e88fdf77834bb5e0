//! Typed UI actions and their construction from raw envelopes.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use shared::{
    domain::{Address, PendingActionId},
    error::ActionError,
    protocol::{tags, RawAction},
};

use crate::state::{PropMap, QrPayload};

pub const DEFAULT_UNLOCK_FAILED_MESSAGE: &str = "Incorrect password. Try again.";
pub const TRANSACTION_ERROR_MESSAGE: &str = "There was a problem submitting this transaction.";
/// Provider value the network controller reports while it is still switching.
pub const LOADING_PROVIDER_SENTINEL: &str = "loading";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarPayload {
    pub transition_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub props: PropMap,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HdPathUpdate {
    pub device: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalRequest {
    pub name: Option<String>,
    pub props: PropMap,
}

impl ModalRequest {
    fn from_payload(mut payload: PropMap) -> Self {
        let name = match payload.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        };
        Self {
            name,
            props: payload,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PairUpdate {
    pub marketinfo: Option<Value>,
}

/// One variant per recognised action, each carrying an already validated
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    NetworkDropdownOpen,
    NetworkDropdownClose,
    SidebarOpen(SidebarPayload),
    SidebarClose,
    AlertOpen(Option<String>),
    AlertClose,
    QrCodeDetected(Option<Value>),
    ModalOpen(ModalRequest),
    ModalClose,
    TransitionForward,
    ForgotPassword(bool),
    ShowConfigPage { trans_forward: bool },
    ShowAddTokenPage { trans_forward: bool },
    SetNewAccountForm(Option<String>),
    ShowInfoPage,
    ShowSendPage,
    ShowSendTokenPage,
    Unlock,
    Lock,
    GoHome,
    ShowAccountDetail(Option<Address>),
    ShowAccountsPage,
    ShowConfTxPage {
        id: Option<PendingActionId>,
        trans_forward: bool,
    },
    CompletedTx(PendingActionId),
    TransactionError,
    UnlockFailed(Option<String>),
    UnlockSucceeded,
    SetHardwareWalletDefaultHdPath(HdPathUpdate),
    ShowLoading(Option<String>),
    HideLoading,
    ShowSubLoading,
    HideSubLoading,
    DisplayWarning(Option<String>),
    HideWarning,
    ShowPrivateKey(String),
    PairUpdate(PairUpdate),
    ShowQr(QrPayload),
    ShowQrView(QrPayload),
    SetMouseUserState(bool),
    GasLoadingStarted,
    GasLoadingFinished,
    SetNetworkNonce(Option<Value>),
    SetPreviousProvider(Option<String>),
    SetSelectedSettingsRpcUrl(String),
    SetNetworksTabAddMode(bool),
    LoadingMethodDataStarted,
    LoadingMethodDataFinished,
    SetThreeBoxLastUpdated(Option<DateTime<Utc>>),
    SetRequestAccountTabs(PropMap),
    SetOpenTabIds(PropMap),
    SetCurrentWindowTab(PropMap),
    /// Any tag the reducer does not know. Always a no-op.
    Unrecognized(String),
}

impl UiAction {
    pub fn tag(&self) -> &str {
        match self {
            Self::NetworkDropdownOpen => tags::NETWORK_DROPDOWN_OPEN,
            Self::NetworkDropdownClose => tags::NETWORK_DROPDOWN_CLOSE,
            Self::SidebarOpen(_) => tags::SIDEBAR_OPEN,
            Self::SidebarClose => tags::SIDEBAR_CLOSE,
            Self::AlertOpen(_) => tags::ALERT_OPEN,
            Self::AlertClose => tags::ALERT_CLOSE,
            Self::QrCodeDetected(_) => tags::QR_CODE_DETECTED,
            Self::ModalOpen(_) => tags::MODAL_OPEN,
            Self::ModalClose => tags::MODAL_CLOSE,
            Self::TransitionForward => tags::TRANSITION_FORWARD,
            Self::ForgotPassword(_) => tags::FORGOT_PASSWORD,
            Self::ShowConfigPage { .. } => tags::SHOW_CONFIG_PAGE,
            Self::ShowAddTokenPage { .. } => tags::SHOW_ADD_TOKEN_PAGE,
            Self::SetNewAccountForm(_) => tags::SET_NEW_ACCOUNT_FORM,
            Self::ShowInfoPage => tags::SHOW_INFO_PAGE,
            Self::ShowSendPage => tags::SHOW_SEND_PAGE,
            Self::ShowSendTokenPage => tags::SHOW_SEND_TOKEN_PAGE,
            Self::Unlock => tags::UNLOCK,
            Self::Lock => tags::LOCK,
            Self::GoHome => tags::GO_HOME,
            Self::ShowAccountDetail(_) => tags::SHOW_ACCOUNT_DETAIL,
            Self::ShowAccountsPage => tags::SHOW_ACCOUNTS_PAGE,
            Self::ShowConfTxPage { .. } => tags::SHOW_CONF_TX_PAGE,
            Self::CompletedTx(_) => tags::COMPLETED_TX,
            Self::TransactionError => tags::TRANSACTION_ERROR,
            Self::UnlockFailed(_) => tags::UNLOCK_FAILED,
            Self::UnlockSucceeded => tags::UNLOCK_SUCCEEDED,
            Self::SetHardwareWalletDefaultHdPath(_) => tags::SET_HARDWARE_WALLET_DEFAULT_HD_PATH,
            Self::ShowLoading(_) => tags::SHOW_LOADING,
            Self::HideLoading => tags::HIDE_LOADING,
            Self::ShowSubLoading => tags::SHOW_SUB_LOADING_INDICATION,
            Self::HideSubLoading => tags::HIDE_SUB_LOADING_INDICATION,
            Self::DisplayWarning(_) => tags::DISPLAY_WARNING,
            Self::HideWarning => tags::HIDE_WARNING,
            Self::ShowPrivateKey(_) => tags::SHOW_PRIVATE_KEY,
            Self::PairUpdate(_) => tags::PAIR_UPDATE,
            Self::ShowQr(_) => tags::SHOW_QR,
            Self::ShowQrView(_) => tags::SHOW_QR_VIEW,
            Self::SetMouseUserState(_) => tags::SET_MOUSE_USER_STATE,
            Self::GasLoadingStarted => tags::GAS_LOADING_STARTED,
            Self::GasLoadingFinished => tags::GAS_LOADING_FINISHED,
            Self::SetNetworkNonce(_) => tags::SET_NETWORK_NONCE,
            Self::SetPreviousProvider(_) => tags::SET_PREVIOUS_PROVIDER,
            Self::SetSelectedSettingsRpcUrl(_) => tags::SET_SELECTED_SETTINGS_RPC_URL,
            Self::SetNetworksTabAddMode(_) => tags::SET_NETWORKS_TAB_ADD_MODE,
            Self::LoadingMethodDataStarted => tags::LOADING_METHOD_DATA_STARTED,
            Self::LoadingMethodDataFinished => tags::LOADING_METHOD_DATA_FINISHED,
            Self::SetThreeBoxLastUpdated(_) => tags::SET_THREEBOX_LAST_UPDATED,
            Self::SetRequestAccountTabs(_) => tags::SET_REQUEST_ACCOUNT_TABS,
            Self::SetOpenTabIds(_) => tags::SET_OPEN_TAB_IDS,
            Self::SetCurrentWindowTab(_) => tags::SET_CURRENT_WINDOW_TAB,
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Builds the internal 3Box timestamp action from epoch milliseconds.
    pub fn three_box_last_updated(millis: i64) -> Result<Self, ActionError> {
        let timestamp = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            ActionError::malformed(
                tags::SET_THREEBOX_LAST_UPDATED,
                "value",
                serde::de::Error::custom(format!(
                    "timestamp {millis}ms is outside the representable range"
                )),
            )
        })?;
        Ok(Self::SetThreeBoxLastUpdated(Some(timestamp)))
    }
}

impl TryFrom<RawAction> for UiAction {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let action = match raw.tag.as_str() {
            tags::NETWORK_DROPDOWN_OPEN => Self::NetworkDropdownOpen,
            tags::NETWORK_DROPDOWN_CLOSE => Self::NetworkDropdownClose,
            tags::SIDEBAR_OPEN => Self::SidebarOpen(raw.value_as()?.unwrap_or_default()),
            tags::SIDEBAR_CLOSE => Self::SidebarClose,
            tags::ALERT_OPEN => Self::AlertOpen(raw.value_as()?),
            tags::ALERT_CLOSE => Self::AlertClose,
            tags::QR_CODE_DETECTED => Self::QrCodeDetected(raw.value.clone()),
            tags::MODAL_OPEN => {
                let payload: PropMap = raw
                    .field_as("payload", raw.payload.as_ref())?
                    .ok_or_else(|| ActionError::missing(&raw.tag, "payload"))?;
                Self::ModalOpen(ModalRequest::from_payload(payload))
            }
            tags::MODAL_CLOSE => Self::ModalClose,
            tags::TRANSITION_FORWARD => Self::TransitionForward,
            tags::FORGOT_PASSWORD => Self::ForgotPassword(raw.value_as()?.unwrap_or(false)),
            tags::SHOW_CONFIG_PAGE => Self::ShowConfigPage {
                trans_forward: raw.value_as()?.unwrap_or(true),
            },
            tags::SHOW_ADD_TOKEN_PAGE => Self::ShowAddTokenPage {
                trans_forward: raw.value_as()?.unwrap_or(true),
            },
            tags::SET_NEW_ACCOUNT_FORM => Self::SetNewAccountForm(
                raw.field_as("formToSelect", raw.form_to_select.as_ref())?,
            ),
            tags::SHOW_INFO_PAGE => Self::ShowInfoPage,
            tags::SHOW_SEND_PAGE => Self::ShowSendPage,
            tags::SHOW_SEND_TOKEN_PAGE => Self::ShowSendTokenPage,
            tags::UNLOCK => Self::Unlock,
            tags::LOCK => Self::Lock,
            tags::GO_HOME => Self::GoHome,
            tags::SHOW_ACCOUNT_DETAIL => Self::ShowAccountDetail(raw.value_as()?),
            tags::SHOW_ACCOUNTS_PAGE => Self::ShowAccountsPage,
            tags::SHOW_CONF_TX_PAGE => Self::ShowConfTxPage {
                id: raw.field_as("id", raw.id.as_ref())?,
                trans_forward: raw
                    .field_as("transForward", raw.trans_forward.as_ref())?
                    .unwrap_or(true),
            },
            tags::COMPLETED_TX => Self::CompletedTx(raw.require_value()?),
            tags::TRANSACTION_ERROR => Self::TransactionError,
            tags::UNLOCK_FAILED => Self::UnlockFailed(raw.value_as()?),
            tags::UNLOCK_SUCCEEDED => Self::UnlockSucceeded,
            tags::SET_HARDWARE_WALLET_DEFAULT_HD_PATH => {
                Self::SetHardwareWalletDefaultHdPath(raw.require_value()?)
            }
            tags::SHOW_LOADING => Self::ShowLoading(raw.value_as()?),
            tags::HIDE_LOADING => Self::HideLoading,
            tags::SHOW_SUB_LOADING_INDICATION => Self::ShowSubLoading,
            tags::HIDE_SUB_LOADING_INDICATION => Self::HideSubLoading,
            tags::DISPLAY_WARNING => Self::DisplayWarning(raw.value_as()?),
            tags::HIDE_WARNING => Self::HideWarning,
            tags::SHOW_PRIVATE_KEY => Self::ShowPrivateKey(raw.require_value()?),
            tags::PAIR_UPDATE => Self::PairUpdate(raw.require_value()?),
            tags::SHOW_QR => Self::ShowQr(raw.require_value()?),
            tags::SHOW_QR_VIEW => Self::ShowQrView(raw.require_value()?),
            tags::SET_MOUSE_USER_STATE => Self::SetMouseUserState(raw.require_value()?),
            tags::GAS_LOADING_STARTED => Self::GasLoadingStarted,
            tags::GAS_LOADING_FINISHED => Self::GasLoadingFinished,
            tags::SET_NETWORK_NONCE => Self::SetNetworkNonce(raw.value.clone()),
            tags::SET_PREVIOUS_PROVIDER => Self::SetPreviousProvider(raw.value_as()?),
            tags::SET_SELECTED_SETTINGS_RPC_URL => {
                Self::SetSelectedSettingsRpcUrl(raw.value_as()?.unwrap_or_default())
            }
            tags::SET_NETWORKS_TAB_ADD_MODE => Self::SetNetworksTabAddMode(raw.require_value()?),
            tags::LOADING_METHOD_DATA_STARTED => Self::LoadingMethodDataStarted,
            tags::LOADING_METHOD_DATA_FINISHED => Self::LoadingMethodDataFinished,
            tags::SET_THREEBOX_LAST_UPDATED => match raw.value_as::<i64>()? {
                Some(millis) => Self::three_box_last_updated(millis)?,
                None => Self::SetThreeBoxLastUpdated(None),
            },
            tags::SET_REQUEST_ACCOUNT_TABS => {
                Self::SetRequestAccountTabs(raw.value_as()?.unwrap_or_default())
            }
            tags::SET_OPEN_TAB_IDS => Self::SetOpenTabIds(raw.value_as()?.unwrap_or_default()),
            tags::SET_CURRENT_WINDOW_TAB => {
                Self::SetCurrentWindowTab(raw.value_as()?.unwrap_or_default())
            }
            _ => Self::Unrecognized(raw.tag.clone()),
        };

        Ok(action)
    }
}

#[cfg(test)]
#[path = "tests/action_tests.rs"]
mod tests;
