use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::ActionError;

/// Action tags understood by the UI reducer. Anything else is ignored.
pub mod tags {
    pub const NETWORK_DROPDOWN_OPEN: &str = "NETWORK_DROPDOWN_OPEN";
    pub const NETWORK_DROPDOWN_CLOSE: &str = "NETWORK_DROPDOWN_CLOSE";
    pub const SIDEBAR_OPEN: &str = "SIDEBAR_OPEN";
    pub const SIDEBAR_CLOSE: &str = "SIDEBAR_CLOSE";
    pub const ALERT_OPEN: &str = "UI_ALERT_OPEN";
    pub const ALERT_CLOSE: &str = "UI_ALERT_CLOSE";
    pub const QR_CODE_DETECTED: &str = "UI_QR_CODE_DETECTED";
    pub const MODAL_OPEN: &str = "UI_MODAL_OPEN";
    pub const MODAL_CLOSE: &str = "UI_MODAL_CLOSE";
    pub const TRANSITION_FORWARD: &str = "TRANSITION_FORWARD";
    pub const FORGOT_PASSWORD: &str = "FORGOT_PASSWORD";
    pub const SHOW_CONFIG_PAGE: &str = "SHOW_CONFIG_PAGE";
    pub const SHOW_ADD_TOKEN_PAGE: &str = "SHOW_ADD_TOKEN_PAGE";
    pub const SET_NEW_ACCOUNT_FORM: &str = "SET_NEW_ACCOUNT_FORM";
    pub const SHOW_INFO_PAGE: &str = "SHOW_INFO_PAGE";
    pub const SHOW_SEND_PAGE: &str = "SHOW_SEND_PAGE";
    pub const SHOW_SEND_TOKEN_PAGE: &str = "SHOW_SEND_TOKEN_PAGE";
    pub const UNLOCK: &str = "UNLOCK_METAMASK";
    pub const LOCK: &str = "LOCK_METAMASK";
    pub const GO_HOME: &str = "GO_HOME";
    pub const SHOW_ACCOUNT_DETAIL: &str = "SHOW_ACCOUNT_DETAIL";
    pub const SHOW_ACCOUNTS_PAGE: &str = "SHOW_ACCOUNTS_PAGE";
    pub const SHOW_CONF_TX_PAGE: &str = "SHOW_CONF_TX_PAGE";
    pub const COMPLETED_TX: &str = "COMPLETED_TX";
    pub const TRANSACTION_ERROR: &str = "TRANSACTION_ERROR";
    pub const UNLOCK_FAILED: &str = "UNLOCK_FAILED";
    pub const UNLOCK_SUCCEEDED: &str = "UNLOCK_SUCCEEDED";
    pub const SET_HARDWARE_WALLET_DEFAULT_HD_PATH: &str = "SET_HARDWARE_WALLET_DEFAULT_HD_PATH";
    pub const SHOW_LOADING: &str = "SHOW_LOADING_INDICATION";
    pub const HIDE_LOADING: &str = "HIDE_LOADING_INDICATION";
    pub const SHOW_SUB_LOADING_INDICATION: &str = "SHOW_SUB_LOADING_INDICATION";
    pub const HIDE_SUB_LOADING_INDICATION: &str = "HIDE_SUB_LOADING_INDICATION";
    pub const DISPLAY_WARNING: &str = "DISPLAY_WARNING";
    pub const HIDE_WARNING: &str = "HIDE_WARNING";
    pub const SHOW_PRIVATE_KEY: &str = "SHOW_PRIVATE_KEY";
    pub const PAIR_UPDATE: &str = "PAIR_UPDATE";
    pub const SHOW_QR: &str = "SHOW_QR";
    pub const SHOW_QR_VIEW: &str = "SHOW_QR_VIEW";
    pub const SET_MOUSE_USER_STATE: &str = "SET_MOUSE_USER_STATE";
    pub const GAS_LOADING_STARTED: &str = "GAS_LOADING_STARTED";
    pub const GAS_LOADING_FINISHED: &str = "GAS_LOADING_FINISHED";
    pub const SET_NETWORK_NONCE: &str = "SET_NETWORK_NONCE";
    pub const SET_PREVIOUS_PROVIDER: &str = "SET_PREVIOUS_PROVIDER";
    pub const SET_SELECTED_SETTINGS_RPC_URL: &str = "SET_SELECTED_SETTINGS_RPC_URL";
    pub const SET_NETWORKS_TAB_ADD_MODE: &str = "SET_NETWORKS_TAB_ADD_MODE";
    pub const LOADING_METHOD_DATA_STARTED: &str = "LOADING_METHOD_DATA_STARTED";
    pub const LOADING_METHOD_DATA_FINISHED: &str = "LOADING_METHOD_DATA_FINISHED";
    pub const SET_THREEBOX_LAST_UPDATED: &str = "metamask/app/SET_THREEBOX_LAST_UPDATED";
    pub const SET_REQUEST_ACCOUNT_TABS: &str = "SET_REQUEST_ACCOUNT_TABS";
    pub const SET_OPEN_TAB_IDS: &str = "SET_OPEN_METAMASK_TAB_IDS";
    pub const SET_CURRENT_WINDOW_TAB: &str = "SET_CURRENT_WINDOW_TAB";
}

/// Untyped action envelope as emitted by the component layer.
///
/// Most actions carry their data under `value`; a few use dedicated keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans_forward: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_to_select: Option<Value>,
}

impl RawAction {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Decodes `value`, treating `null` the same as an absent field.
    pub fn value_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ActionError> {
        decode_field(&self.tag, "value", self.value.as_ref())
    }

    pub fn require_value<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        self.value_as()?
            .ok_or_else(|| ActionError::missing(&self.tag, "value"))
    }

    pub fn field_as<T: DeserializeOwned>(
        &self,
        field: &'static str,
        raw: Option<&Value>,
    ) -> Result<Option<T>, ActionError> {
        decode_field(&self.tag, field, raw)
    }
}

fn decode_field<T: DeserializeOwned>(
    tag: &str,
    field: &'static str,
    raw: Option<&Value>,
) -> Result<Option<T>, ActionError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => T::deserialize(raw)
            .map(Some)
            .map_err(|err| ActionError::malformed(tag, field, err)),
    }
}
