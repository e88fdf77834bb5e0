use super::*;
use std::collections::BTreeMap;

use serde_json::json;
use shared::domain::{NetworkId, PendingActionKind, PendingRequest};

use crate::{
    action::{HdPathUpdate, ModalRequest, PairUpdate, SidebarPayload},
    pending::{PendingQueues, WalletSnapshot},
    state::{AccountExport, AccountSubview, QrPayload},
};

fn wallet(selected: Option<&str>, tx_ids: &[i64]) -> WalletSnapshot {
    let unapproved_txs = tx_ids
        .iter()
        .enumerate()
        .map(|(position, id)| {
            (
                PendingActionId(*id),
                PendingRequest {
                    id: PendingActionId(*id),
                    time: position as i64,
                    network_id: Some(NetworkId::new("1")),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    WalletSnapshot {
        selected_address: selected.map(Address::new),
        network: Some(NetworkId::new("1")),
        queues: PendingQueues {
            unapproved_txs,
            ..PendingQueues::default()
        },
    }
}

fn state_with(ui: UiState) -> CombinedState {
    CombinedState::new(wallet(Some("0xabc"), &[])).with_ui(ui)
}

fn fresh() -> UiState {
    reduce(
        &CombinedState::new(wallet(Some("0xabc"), &[])),
        &UiAction::Unrecognized("@@INIT".to_string()),
    )
}

struct FixedFlattener(Vec<i64>);

impl PendingActionFlattener for FixedFlattener {
    fn flatten(
        &self,
        _queues: &PendingQueues,
        _network: Option<&shared::domain::NetworkId>,
    ) -> Vec<PendingAction> {
        self.0
            .iter()
            .map(|id| PendingAction {
                id: PendingActionId(*id),
                time: 0,
                kind: PendingActionKind::Transaction,
            })
            .collect()
    }
}

#[test]
fn fresh_state_uses_default_template() {
    let ui = fresh();

    assert_eq!(ui.current_view.name, ScreenName::AccountDetail);
    assert_eq!(
        ui.current_view.context,
        Some(ViewContext::Address(Address::new("0xabc")))
    );
    assert!(ui.trans_forward);
    assert!(!ui.modal.open);
    assert_eq!(ui.account_detail.subview, AccountSubview::Transactions);
    assert_eq!(
        ui.default_hd_paths.get("trezor").map(String::as_str),
        Some("m/44'/60'/0'/0")
    );
    assert_eq!(
        ui.default_hd_paths.get("ledger").map(String::as_str),
        Some("m/44'/60'/0'/0/0")
    );
}

#[test]
fn custom_flattener_drives_default_view() {
    let reducer = UiReducer::new(FixedFlattener(vec![9]));
    let ui = reducer.reduce(
        &CombinedState::new(wallet(None, &[])),
        &UiAction::Unrecognized("noop".to_string()),
    );
    assert_eq!(ui.current_view.name, ScreenName::ConfTx);
}

#[test]
fn sidebar_open_replaces_payload_and_close_keeps_it() {
    let payload = SidebarPayload {
        transition_name: "sidebar-left".to_string(),
        kind: "wallet-view".to_string(),
        props: json!({"collapsed": false})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    };

    let opened = reduce(&state_with(fresh()), &UiAction::SidebarOpen(payload));
    assert!(opened.sidebar.is_open);
    assert_eq!(opened.sidebar.kind, "wallet-view");

    let closed = reduce(&state_with(opened), &UiAction::SidebarClose);
    assert!(!closed.sidebar.is_open);
    assert_eq!(closed.sidebar.transition_name, "sidebar-left");
}

#[test]
fn alert_close_clears_message() {
    let opened = reduce(
        &state_with(fresh()),
        &UiAction::AlertOpen(Some("copied".to_string())),
    );
    assert!(opened.alert_open);
    assert_eq!(opened.alert_message.as_deref(), Some("copied"));

    let closed = reduce(&state_with(opened), &UiAction::AlertClose);
    assert!(!closed.alert_open);
    assert!(closed.alert_message.is_none());
}

#[test]
fn forgot_password_forces_restore_vault() {
    let ui = reduce(&state_with(fresh()), &UiAction::ForgotPassword(true));
    assert_eq!(ui.forgotten_password, Some(true));
    assert_eq!(ui.current_view, CurrentView::new(ScreenName::RestoreVault));

    let ui = reduce(&state_with(fresh()), &UiAction::ForgotPassword(false));
    assert_eq!(ui.forgotten_password, Some(false));
    assert_eq!(ui.current_view.name, ScreenName::AccountDetail);
}

#[test]
fn page_navigation_preserves_context() {
    let start = fresh();
    let context = start.current_view.context.clone();

    let config = reduce(
        &state_with(start.clone()),
        &UiAction::ShowConfigPage {
            trans_forward: false,
        },
    );
    assert_eq!(config.current_view.name, ScreenName::Config);
    assert_eq!(config.current_view.context, context);
    assert!(!config.trans_forward);

    let token = reduce(
        &state_with(start.clone()),
        &UiAction::ShowAddTokenPage {
            trans_forward: true,
        },
    );
    assert_eq!(token.current_view.name, ScreenName::AddToken);
    assert_eq!(token.current_view.context, context);

    let info = reduce(&state_with(config), &UiAction::ShowInfoPage);
    assert_eq!(info.current_view.name, ScreenName::Info);
    assert!(info.trans_forward);
}

#[test]
fn new_account_form_overwrites_context_only() {
    let ui = reduce(
        &state_with(fresh()),
        &UiAction::SetNewAccountForm(Some("CONNECT".to_string())),
    );
    assert_eq!(ui.current_view.name, ScreenName::AccountDetail);
    assert_eq!(
        ui.current_view.context,
        Some(ViewContext::Form("CONNECT".to_string()))
    );
}

#[test]
fn send_pages_clear_warning() {
    let warned = UiState {
        warning: Some("boom".to_string()),
        trans_forward: false,
        ..fresh()
    };

    let send = reduce(&state_with(warned.clone()), &UiAction::ShowSendPage);
    assert_eq!(send.current_view.name, ScreenName::SendTransaction);
    assert!(send.trans_forward);
    assert!(send.warning.is_none());

    let token = reduce(&state_with(warned), &UiAction::ShowSendTokenPage);
    assert_eq!(token.current_view.name, ScreenName::SendToken);
    assert!(token.warning.is_none());
}

#[test]
fn unlock_flips_forgotten_password_only_when_set() {
    let forgot = UiState {
        forgotten_password: Some(true),
        is_loading: true,
        warning: Some("x".to_string()),
        ..fresh()
    };
    let ui = reduce(&state_with(forgot), &UiAction::Unlock);
    assert_eq!(ui.forgotten_password, Some(false));
    assert!(!ui.is_loading);
    assert!(ui.warning.is_none());
    assert!(ui.trans_forward);

    let not_forgot = UiState {
        forgotten_password: Some(false),
        ..fresh()
    };
    let ui = reduce(&state_with(not_forgot), &UiAction::Unlock);
    assert_eq!(ui.forgotten_password, None);
}

#[test]
fn lock_returns_to_computed_default_view() {
    let on_config = UiState {
        current_view: CurrentView::new(ScreenName::Config),
        warning: Some("x".to_string()),
        ..fresh()
    };
    let state = CombinedState::new(wallet(Some("0xabc"), &[1])).with_ui(on_config);

    let ui = reduce(&state, &UiAction::Lock);
    assert_eq!(ui.current_view.name, ScreenName::ConfTx);
    assert_eq!(
        ui.current_view.context,
        Some(ViewContext::Address(Address::new("0xabc")))
    );
    assert!(!ui.trans_forward);
    assert!(ui.warning.is_none());
}

#[test]
fn go_home_resets_account_detail_and_keeps_context() {
    let exporting = UiState {
        current_view: CurrentView::with_context(
            ScreenName::Config,
            Some(ViewContext::Address(Address::new("0xdef"))),
        ),
        account_detail: AccountDetail::exported("secret"),
        warning: Some("x".to_string()),
        ..fresh()
    };

    let ui = reduce(&state_with(exporting), &UiAction::GoHome);
    assert_eq!(ui.current_view.name, ScreenName::AccountDetail);
    assert_eq!(
        ui.current_view.context,
        Some(ViewContext::Address(Address::new("0xdef")))
    );
    assert_eq!(ui.account_detail, AccountDetail::default());
    assert!(!ui.trans_forward);
    assert!(ui.warning.is_none());
}

#[test]
fn show_account_detail_takes_address_and_keeps_warning() {
    let start = UiState {
        forgotten_password: Some(true),
        warning: Some("still here".to_string()),
        account_detail: AccountDetail::exported("secret"),
        ..fresh()
    };

    let ui = reduce(
        &state_with(start),
        &UiAction::ShowAccountDetail(Some(Address::new("0x123"))),
    );
    assert_eq!(
        ui.current_view,
        CurrentView::with_context(
            ScreenName::AccountDetail,
            Some(ViewContext::Address(Address::new("0x123")))
        )
    );
    assert_eq!(ui.forgotten_password, Some(false));
    assert_eq!(ui.account_detail, AccountDetail::default());
    assert_eq!(ui.warning.as_deref(), Some("still here"));
}

#[test]
fn accounts_page_clears_transient_flags() {
    let busy = UiState {
        is_loading: true,
        warning: Some("x".to_string()),
        forgotten_password: Some(true),
        scroll_to_bottom: true,
        ..fresh()
    };

    let ui = reduce(&state_with(busy), &UiAction::ShowAccountsPage);
    assert_eq!(ui.current_view, CurrentView::new(ScreenName::Accounts));
    assert!(!ui.is_loading);
    assert!(ui.warning.is_none());
    assert_eq!(ui.forgotten_password, Some(false));
    assert!(!ui.scroll_to_bottom);
}

#[test]
fn confirm_page_for_unknown_id_falls_back_to_first() {
    let state = CombinedState::new(wallet(Some("0xabc"), &[1, 2]));
    let ui = reduce(
        &state,
        &UiAction::ShowConfTxPage {
            id: Some(PendingActionId(99)),
            trans_forward: false,
        },
    );
    assert_eq!(ui.current_view.context, Some(ViewContext::Index(0)));
    assert!(!ui.trans_forward);
}

#[test]
fn transaction_error_keeps_context() {
    let start = UiState {
        current_view: CurrentView::with_context(ScreenName::ConfTx, Some(ViewContext::Index(2))),
        ..fresh()
    };

    let ui = reduce(&state_with(start), &UiAction::TransactionError);
    assert_eq!(ui.current_view.name, ScreenName::ConfTx);
    assert_eq!(ui.current_view.context, Some(ViewContext::Index(2)));
    assert_eq!(
        ui.current_view.error_message.as_deref(),
        Some(TRANSACTION_ERROR_MESSAGE)
    );
}

#[test]
fn hd_path_upsert_keeps_other_devices() {
    let ui = reduce(
        &state_with(fresh()),
        &UiAction::SetHardwareWalletDefaultHdPath(HdPathUpdate {
            device: "ledger".to_string(),
            path: "m/44'/60'/0'".to_string(),
        }),
    );
    let ui = reduce(
        &state_with(ui),
        &UiAction::SetHardwareWalletDefaultHdPath(HdPathUpdate {
            device: "lattice".to_string(),
            path: "m/44'/60'/0'/0/x".to_string(),
        }),
    );

    assert_eq!(ui.default_hd_paths.len(), 3);
    assert_eq!(
        ui.default_hd_paths.get("ledger").map(String::as_str),
        Some("m/44'/60'/0'")
    );
    assert_eq!(
        ui.default_hd_paths.get("trezor").map(String::as_str),
        Some("m/44'/60'/0'/0")
    );
}

#[test]
fn loading_indicators_toggle() {
    let ui = reduce(
        &state_with(fresh()),
        &UiAction::ShowLoading(Some("Working".to_string())),
    );
    assert!(ui.is_loading);
    assert_eq!(ui.loading_message.as_deref(), Some("Working"));

    let ui = reduce(&state_with(ui), &UiAction::ShowSubLoading);
    assert!(ui.is_sub_loading);

    let ui = reduce(&state_with(ui), &UiAction::HideLoading);
    let ui = reduce(&state_with(ui), &UiAction::HideSubLoading);
    assert!(!ui.is_loading);
    assert!(!ui.is_sub_loading);
}

#[test]
fn display_warning_stops_loading_and_hide_clears() {
    let loading = UiState {
        is_loading: true,
        ..fresh()
    };
    let ui = reduce(
        &state_with(loading),
        &UiAction::DisplayWarning(Some("nope".to_string())),
    );
    assert_eq!(ui.warning.as_deref(), Some("nope"));
    assert!(!ui.is_loading);

    let ui = reduce(&state_with(ui), &UiAction::HideWarning);
    assert!(ui.warning.is_none());
}

#[test]
fn private_key_switches_to_export() {
    let ui = reduce(
        &state_with(fresh()),
        &UiAction::ShowPrivateKey("deadbeef".to_string()),
    );
    assert_eq!(ui.account_detail.subview, AccountSubview::Export);
    assert_eq!(ui.account_detail.account_export, AccountExport::Completed);
    assert_eq!(ui.account_detail.private_key, "deadbeef");
}

#[test]
fn pair_update_keeps_existing_buy_inputs() {
    let start = UiState {
        buy_view: BuyView {
            form_view: Some(BuyFormView {
                coin_options: Some(json!({"BTC": {}})),
                ..BuyFormView::default()
            }),
            buy_address: Some("0xbuy".to_string()),
            amount: Some("1.5".to_string()),
            warning: Some("old".to_string()),
            ..BuyView::default()
        },
        ..fresh()
    };

    let ui = reduce(
        &state_with(start),
        &UiAction::PairUpdate(PairUpdate {
            marketinfo: Some(json!({"rate": 2})),
        }),
    );

    let form = ui.buy_view.form_view.clone().expect("form view");
    assert_eq!(ui.buy_view.subview.as_deref(), Some("ShapeShift"));
    assert!(form.shapeshift);
    assert!(!form.coinbase);
    assert_eq!(form.marketinfo, Some(json!({"rate": 2})));
    assert_eq!(form.coin_options, Some(json!({"BTC": {}})));
    assert_eq!(ui.buy_view.buy_address.as_deref(), Some("0xbuy"));
    assert_eq!(ui.buy_view.amount.as_deref(), Some("1.5"));
    assert!(ui.buy_view.warning.is_none());
}

#[test]
fn qr_view_navigates_but_plain_qr_does_not() {
    let qr = QrPayload {
        message: Some("Deposit".to_string()),
        data: Some(json!("0xabc")),
    };

    let ui = reduce(&state_with(fresh()), &UiAction::ShowQr(qr.clone()));
    assert!(ui.qr_requested);
    assert_eq!(ui.current_view.name, ScreenName::AccountDetail);
    assert_eq!(ui.qr, Some(qr.clone()));

    let ui = reduce(&state_with(fresh()), &UiAction::ShowQrView(qr.clone()));
    assert_eq!(ui.current_view.name, ScreenName::Qr);
    assert!(ui.trans_forward);
    assert_eq!(ui.qr, Some(qr));
}

#[test]
fn previous_provider_ignores_loading_sentinel() {
    let start = UiState {
        last_selected_provider: Some("rinkeby".to_string()),
        ..fresh()
    };

    let ui = reduce(
        &state_with(start.clone()),
        &UiAction::SetPreviousProvider(Some("loading".to_string())),
    );
    assert_eq!(ui, start);

    let ui = reduce(
        &state_with(start),
        &UiAction::SetPreviousProvider(Some("mainnet".to_string())),
    );
    assert_eq!(ui.last_selected_provider.as_deref(), Some("mainnet"));
}

#[test]
fn scalar_setters_store_values() {
    let mut ui = fresh();
    for action in [
        UiAction::SetMouseUserState(true),
        UiAction::GasLoadingStarted,
        UiAction::LoadingMethodDataStarted,
        UiAction::SetNetworkNonce(Some(json!(7))),
        UiAction::SetSelectedSettingsRpcUrl("http://localhost:8545".to_string()),
        UiAction::SetNetworksTabAddMode(true),
        UiAction::NetworkDropdownOpen,
        UiAction::QrCodeDetected(Some(json!({"type": "address"}))),
        UiAction::three_box_last_updated(1_000).expect("in range"),
    ] {
        ui = reduce(&state_with(ui), &action);
    }

    assert!(ui.is_mouse_user);
    assert!(ui.gas_is_loading);
    assert!(ui.loading_method_data);
    assert_eq!(ui.network_nonce, Some(json!(7)));
    assert_eq!(ui.networks_tab_selected_rpc_url, "http://localhost:8545");
    assert!(ui.networks_tab_is_in_add_mode);
    assert!(ui.network_dropdown_open);
    assert_eq!(ui.qr_code_data, Some(json!({"type": "address"})));
    assert_eq!(
        ui.three_box_last_updated.map(|at| at.timestamp_millis()),
        Some(1_000)
    );

    for action in [
        UiAction::GasLoadingFinished,
        UiAction::LoadingMethodDataFinished,
        UiAction::NetworkDropdownClose,
    ] {
        ui = reduce(&state_with(ui), &action);
    }
    assert!(!ui.gas_is_loading);
    assert!(!ui.loading_method_data);
    assert!(!ui.network_dropdown_open);
}

#[test]
fn tab_maps_are_replaced_wholesale() {
    let start = UiState {
        request_account_tabs: json!({"old": 1}).as_object().cloned().unwrap_or_default(),
        ..fresh()
    };
    let replacement = json!({"new": 2}).as_object().cloned().unwrap_or_default();

    let ui = reduce(
        &state_with(start),
        &UiAction::SetRequestAccountTabs(replacement.clone()),
    );
    assert_eq!(ui.request_account_tabs, replacement);

    let ui = reduce(&state_with(ui), &UiAction::SetOpenTabIds(replacement.clone()));
    let ui = reduce(&state_with(ui), &UiAction::SetCurrentWindowTab(replacement.clone()));
    assert_eq!(ui.open_wallet_tabs, replacement);
    assert_eq!(ui.current_window_tab, replacement);
}

#[test]
fn modal_open_snapshots_full_previous_state() {
    let ui = reduce(
        &state_with(fresh()),
        &UiAction::ModalOpen(ModalRequest {
            name: Some("A".to_string()),
            props: json!({"x": 1}).as_object().cloned().unwrap_or_default(),
        }),
    );
    assert!(ui.modal.open);
    assert_eq!(ui.modal.previous_modal_state, ModalState::default());

    let ui = reduce(&state_with(ui), &UiAction::ModalClose);
    assert!(!ui.modal.open);
    assert_eq!(ui.modal.previous_modal_state.name.as_deref(), Some("A"));
    assert_eq!(ui.modal.previous_modal_state.props.get("x"), Some(&json!(1)));
    assert_eq!(ui.modal.modal_state, ModalState::default());
}
