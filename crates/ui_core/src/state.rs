//! The UI-state snapshot produced by the reducer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use shared::domain::{Address, ScreenName};

pub const TREZOR_DEFAULT_HD_PATH: &str = "m/44'/60'/0'/0";
pub const LEDGER_DEFAULT_HD_PATH: &str = "m/44'/60'/0'/0/0";

/// Loosely typed key/value bag carried through untouched.
pub type PropMap = Map<String, Value>;

/// Screen-specific selector. On the wire it is a bare number (pending
/// action index) or string (`0x` address, otherwise a form selector).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewContext {
    Index(usize),
    Address(Address),
    Form(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireContext {
    Index(usize),
    Text(String),
}

impl<'de> Deserialize<'de> for ViewContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireContext::deserialize(deserializer)? {
            WireContext::Index(index) => Self::Index(index),
            WireContext::Text(text) if text.starts_with("0x") => Self::Address(Address(text)),
            WireContext::Text(text) => Self::Form(text),
        })
    }
}

impl From<Address> for ViewContext {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentView {
    pub name: ScreenName,
    #[serde(default)]
    pub context: Option<ViewContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CurrentView {
    pub fn new(name: ScreenName) -> Self {
        Self {
            name,
            context: None,
            error_message: None,
        }
    }

    pub fn with_context(name: ScreenName, context: Option<ViewContext>) -> Self {
        Self {
            name,
            context,
            error_message: None,
        }
    }

    /// Same context, different screen.
    pub fn renamed(&self, name: ScreenName) -> Self {
        Self::with_context(name, self.context.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub name: Option<String>,
    #[serde(default)]
    pub props: PropMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalStack {
    pub open: bool,
    pub modal_state: ModalState,
    pub previous_modal_state: ModalState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    pub is_open: bool,
    #[serde(default)]
    pub transition_name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub props: PropMap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountSubview {
    #[default]
    Transactions,
    Export,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountExport {
    #[default]
    None,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub subview: AccountSubview,
    pub account_export: AccountExport,
    pub private_key: String,
}

impl AccountDetail {
    pub fn exported(private_key: impl Into<String>) -> Self {
        Self {
            subview: AccountSubview::Export,
            account_export: AccountExport::Completed,
            private_key: private_key.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyFormView {
    pub coinbase: bool,
    pub shapeshift: bool,
    #[serde(default)]
    pub marketinfo: Option<Value>,
    #[serde(default)]
    pub coin_options: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_view: Option<BuyFormView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Everything the popup needs to decide what to draw.
///
/// Values are never mutated in place; every transition builds a new record
/// from the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Set when the notification window should close itself.
    pub should_close: bool,
    pub menu_open: bool,
    pub modal: ModalStack,
    pub sidebar: Sidebar,
    pub alert_open: bool,
    pub alert_message: Option<String>,
    pub qr_code_data: Option<Value>,
    pub network_dropdown_open: bool,
    pub current_view: CurrentView,
    pub account_detail: AccountDetail,
    /// Direction of the screen transition animation.
    pub trans_forward: bool,
    pub is_loading: bool,
    pub loading_message: Option<String>,
    pub is_sub_loading: bool,
    /// User-visible error text. `Some("")` and `None` both render as no warning.
    pub warning: Option<String>,
    pub forgotten_password: Option<bool>,
    pub scroll_to_bottom: bool,
    pub buy_view: BuyView,
    pub qr_requested: bool,
    #[serde(rename = "Qr")]
    pub qr: Option<QrPayload>,
    pub is_mouse_user: bool,
    pub gas_is_loading: bool,
    pub network_nonce: Option<Value>,
    pub default_hd_paths: BTreeMap<String, String>,
    pub last_selected_provider: Option<String>,
    pub networks_tab_selected_rpc_url: String,
    pub networks_tab_is_in_add_mode: bool,
    pub loading_method_data: bool,
    #[serde(rename = "show3BoxModalAfterImport")]
    pub show_3box_modal_after_import: bool,
    #[serde(
        rename = "threeBoxLastUpdated",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub three_box_last_updated: Option<DateTime<Utc>>,
    pub request_account_tabs: PropMap,
    #[serde(rename = "openMetaMaskTabs")]
    pub open_wallet_tabs: PropMap,
    pub current_window_tab: PropMap,
}

impl UiState {
    /// Fresh state showing `current_view`.
    pub fn with_view(current_view: CurrentView) -> Self {
        let default_hd_paths = BTreeMap::from([
            ("trezor".to_string(), TREZOR_DEFAULT_HD_PATH.to_string()),
            ("ledger".to_string(), LEDGER_DEFAULT_HD_PATH.to_string()),
        ]);

        Self {
            should_close: false,
            menu_open: false,
            modal: ModalStack::default(),
            sidebar: Sidebar::default(),
            alert_open: false,
            alert_message: None,
            qr_code_data: None,
            network_dropdown_open: false,
            current_view,
            account_detail: AccountDetail::default(),
            trans_forward: true,
            is_loading: false,
            loading_message: None,
            is_sub_loading: false,
            warning: None,
            forgotten_password: None,
            scroll_to_bottom: false,
            buy_view: BuyView::default(),
            qr_requested: false,
            qr: None,
            is_mouse_user: false,
            gas_is_loading: false,
            network_nonce: None,
            default_hd_paths,
            last_selected_provider: None,
            networks_tab_selected_rpc_url: String::new(),
            networks_tab_is_in_add_mode: false,
            loading_method_data: false,
            show_3box_modal_after_import: false,
            three_box_last_updated: None,
            request_account_tabs: PropMap::new(),
            open_wallet_tabs: PropMap::new(),
            current_window_tab: PropMap::new(),
        }
    }

    /// Shallow-merges stored fields onto a fresh template showing
    /// `default_view`; stored fields win.
    pub fn rehydrate(fields: &PropMap, default_view: CurrentView) -> Result<Self, serde_json::Error> {
        let template = Self::with_view(default_view);
        let Value::Object(mut merged) = serde_json::to_value(&template)? else {
            return Ok(template);
        };
        merged.extend(fields.iter().map(|(key, value)| (key.clone(), value.clone())));
        serde_json::from_value(Value::Object(merged))
    }

    /// Flips a set flag off and leaves an unset one unset.
    pub(crate) fn toggled_forgotten_password(&self) -> Option<bool> {
        match self.forgotten_password {
            Some(true) => Some(false),
            _ => None,
        }
    }
}

/// Previous UI state as the reducer receives it.
///
/// `Live` is a snapshot this process produced. `Rehydrated` holds whatever
/// fields were read back from storage; the missing ones are filled from the
/// template built for the current wallet state on every reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum UiSnapshot {
    Live(UiState),
    Rehydrated(PropMap),
}

impl UiSnapshot {
    pub fn live(&self) -> Option<&UiState> {
        match self {
            Self::Live(ui) => Some(ui),
            Self::Rehydrated(_) => None,
        }
    }

    pub fn resolve(&self, default_view: &CurrentView) -> Result<UiState, serde_json::Error> {
        match self {
            Self::Live(ui) => Ok(ui.clone()),
            Self::Rehydrated(fields) => UiState::rehydrate(fields, default_view.clone()),
        }
    }
}

impl From<UiState> for UiSnapshot {
    fn from(value: UiState) -> Self {
        Self::Live(value)
    }
}

impl Serialize for UiSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Live(ui) => ui.serialize(serializer),
            Self::Rehydrated(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for UiSnapshot {
    /// Rejects stored fields of the wrong shape here, so rehydrating later
    /// only has to fill gaps.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = PropMap::deserialize(deserializer)?;
        UiState::rehydrate(&fields, CurrentView::new(ScreenName::Accounts))
            .map_err(de::Error::custom)?;
        Ok(Self::Rehydrated(fields))
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
