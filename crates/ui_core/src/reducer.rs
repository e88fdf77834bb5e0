//! Pure UI-state transition function.

use shared::domain::{Address, PendingAction, PendingActionId, ScreenName};
use tracing::{debug, warn};

use crate::{
    action::{
        UiAction, DEFAULT_UNLOCK_FAILED_MESSAGE, LOADING_PROVIDER_SENTINEL,
        TRANSACTION_ERROR_MESSAGE,
    },
    pending::{ChronologicalFlattener, CombinedState, PendingActionFlattener},
    state::{
        AccountDetail, BuyFormView, BuyView, CurrentView, ModalStack, ModalState, Sidebar, UiState,
        ViewContext,
    },
};

const BUY_PROVIDER_SUBVIEW: &str = "ShapeShift";

/// Values derived from wallet state at the top of every reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDefaults {
    pub selected_address: Option<Address>,
    pub pending_actions: Vec<PendingAction>,
    pub default_view: CurrentView,
}

impl DerivedDefaults {
    pub fn compute(state: &CombinedState, flattener: &impl PendingActionFlattener) -> Self {
        let selected_address = state.wallet.selected_address.clone();
        let pending_actions = flattener.flatten(&state.wallet.queues, state.wallet.network.as_ref());

        let mut name = if selected_address.is_some() {
            ScreenName::AccountDetail
        } else {
            ScreenName::Accounts
        };
        if !pending_actions.is_empty() {
            debug!(
                pending = pending_actions.len(),
                "pending actions detected, defaulting to confTx view"
            );
            name = ScreenName::ConfTx;
        }

        let default_view = CurrentView::with_context(
            name,
            selected_address.clone().map(ViewContext::Address),
        );

        Self {
            selected_address,
            pending_actions,
            default_view,
        }
    }

    pub fn has_unconf_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    /// Position of `id` in the flattened pending list.
    pub fn index_for_pending(&self, id: PendingActionId) -> Option<usize> {
        self.pending_actions.iter().position(|action| action.id == id)
    }
}

/// Reduces UI actions against a combined wallet/UI state.
#[derive(Debug, Clone, Default)]
pub struct UiReducer<F = ChronologicalFlattener> {
    flattener: F,
}

impl<F: PendingActionFlattener> UiReducer<F> {
    pub fn new(flattener: F) -> Self {
        Self { flattener }
    }

    pub fn flattener(&self) -> &F {
        &self.flattener
    }

    pub fn reduce(&self, state: &CombinedState, action: &UiAction) -> UiState {
        debug!(action = action.tag(), "ui reducer got action");

        let defaults = DerivedDefaults::compute(state, &self.flattener);
        let current = match &state.ui {
            Some(snapshot) => snapshot.resolve(&defaults.default_view).unwrap_or_else(|err| {
                warn!(error = %err, "stored ui state could not be merged, using defaults");
                UiState::with_view(defaults.default_view.clone())
            }),
            None => UiState::with_view(defaults.default_view.clone()),
        };

        apply(current, action, &defaults)
    }
}

fn apply(current: UiState, action: &UiAction, defaults: &DerivedDefaults) -> UiState {
    match action {
        UiAction::NetworkDropdownOpen => UiState {
            network_dropdown_open: true,
            ..current
        },
        UiAction::NetworkDropdownClose => UiState {
            network_dropdown_open: false,
            ..current
        },

        UiAction::SidebarOpen(payload) => UiState {
            sidebar: Sidebar {
                is_open: true,
                transition_name: payload.transition_name.clone(),
                kind: payload.kind.clone(),
                props: payload.props.clone(),
            },
            ..current
        },
        UiAction::SidebarClose => {
            let sidebar = Sidebar {
                is_open: false,
                ..current.sidebar.clone()
            };
            UiState { sidebar, ..current }
        }

        UiAction::AlertOpen(message) => UiState {
            alert_open: true,
            alert_message: message.clone(),
            ..current
        },
        UiAction::AlertClose => UiState {
            alert_open: false,
            alert_message: None,
            ..current
        },

        UiAction::QrCodeDetected(data) => UiState {
            qr_code_data: data.clone(),
            ..current
        },

        UiAction::ModalOpen(request) => {
            let modal = ModalStack {
                open: true,
                modal_state: ModalState {
                    name: request.name.clone(),
                    props: request.props.clone(),
                },
                previous_modal_state: current.modal.modal_state.clone(),
            };
            UiState { modal, ..current }
        }
        UiAction::ModalClose => {
            let modal = ModalStack {
                open: false,
                modal_state: ModalState::default(),
                previous_modal_state: current.modal.modal_state.clone(),
            };
            UiState { modal, ..current }
        }

        UiAction::TransitionForward => UiState {
            trans_forward: true,
            ..current
        },

        UiAction::ForgotPassword(forgotten) => {
            let current_view = if *forgotten {
                CurrentView::new(ScreenName::RestoreVault)
            } else {
                current.current_view.clone()
            };
            UiState {
                forgotten_password: Some(*forgotten),
                current_view,
                ..current
            }
        }

        UiAction::ShowConfigPage { trans_forward } => UiState {
            current_view: current.current_view.renamed(ScreenName::Config),
            trans_forward: *trans_forward,
            ..current
        },
        UiAction::ShowAddTokenPage { trans_forward } => UiState {
            current_view: current.current_view.renamed(ScreenName::AddToken),
            trans_forward: *trans_forward,
            ..current
        },
        UiAction::SetNewAccountForm(form) => UiState {
            current_view: CurrentView::with_context(
                current.current_view.name,
                form.clone().map(ViewContext::Form),
            ),
            ..current
        },
        UiAction::ShowInfoPage => UiState {
            current_view: current.current_view.renamed(ScreenName::Info),
            trans_forward: true,
            ..current
        },
        UiAction::ShowSendPage => UiState {
            current_view: current.current_view.renamed(ScreenName::SendTransaction),
            trans_forward: true,
            warning: None,
            ..current
        },
        UiAction::ShowSendTokenPage => UiState {
            current_view: current.current_view.renamed(ScreenName::SendToken),
            trans_forward: true,
            warning: None,
            ..current
        },

        UiAction::Unlock => UiState {
            forgotten_password: current.toggled_forgotten_password(),
            trans_forward: true,
            is_loading: false,
            warning: None,
            ..current
        },
        UiAction::Lock => UiState {
            current_view: defaults.default_view.clone(),
            trans_forward: false,
            warning: None,
            ..current
        },

        UiAction::GoHome => {
            let current_view = CurrentView {
                name: ScreenName::AccountDetail,
                ..current.current_view.clone()
            };
            UiState {
                current_view,
                account_detail: AccountDetail::default(),
                trans_forward: false,
                warning: None,
                ..current
            }
        }
        UiAction::ShowAccountDetail(address) => UiState {
            forgotten_password: current.toggled_forgotten_password(),
            current_view: CurrentView::with_context(
                ScreenName::AccountDetail,
                address.clone().map(ViewContext::Address),
            ),
            account_detail: AccountDetail::default(),
            trans_forward: false,
            ..current
        },
        UiAction::ShowAccountsPage => UiState {
            current_view: CurrentView::new(ScreenName::Accounts),
            trans_forward: true,
            is_loading: false,
            warning: None,
            scroll_to_bottom: false,
            forgotten_password: Some(false),
            ..current
        },

        UiAction::ShowConfTxPage { id, trans_forward } => {
            let index = match id {
                Some(id) => defaults.index_for_pending(*id).unwrap_or_else(|| {
                    warn!(id = id.0, "confirm page requested for an action that is not pending");
                    0
                }),
                None => 0,
            };
            UiState {
                current_view: CurrentView::with_context(
                    ScreenName::ConfTx,
                    Some(ViewContext::Index(index)),
                ),
                trans_forward: *trans_forward,
                warning: None,
                is_loading: false,
                ..current
            }
        }

        UiAction::CompletedTx(completed) => {
            debug!(id = completed.0, "reducing completed action");
            let has_other_unconf_actions = defaults
                .pending_actions
                .iter()
                .any(|pending| pending.id != *completed);

            if has_other_unconf_actions {
                debug!("other pending actions remain, rendering confTx view");
                UiState {
                    trans_forward: false,
                    current_view: CurrentView::with_context(
                        ScreenName::ConfTx,
                        Some(ViewContext::Index(0)),
                    ),
                    warning: None,
                    ..current
                }
            } else {
                debug!("no pending actions remain, marking popup for close");
                UiState {
                    should_close: true,
                    trans_forward: false,
                    warning: None,
                    current_view: CurrentView::with_context(
                        ScreenName::AccountDetail,
                        defaults.selected_address.clone().map(ViewContext::Address),
                    ),
                    account_detail: AccountDetail::default(),
                    ..current
                }
            }
        }

        // Keeps the existing context, unlike the other confTx transitions.
        UiAction::TransactionError => {
            let current_view = CurrentView {
                name: ScreenName::ConfTx,
                context: current.current_view.context.clone(),
                error_message: Some(TRANSACTION_ERROR_MESSAGE.to_string()),
            };
            UiState {
                current_view,
                ..current
            }
        }

        UiAction::UnlockFailed(message) => {
            let warning = message
                .clone()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| DEFAULT_UNLOCK_FAILED_MESSAGE.to_string());
            UiState {
                warning: Some(warning),
                ..current
            }
        }
        UiAction::UnlockSucceeded => UiState {
            warning: Some(String::new()),
            ..current
        },

        UiAction::SetHardwareWalletDefaultHdPath(update) => {
            let mut default_hd_paths = current.default_hd_paths.clone();
            default_hd_paths.insert(update.device.clone(), update.path.clone());
            UiState {
                default_hd_paths,
                ..current
            }
        }

        UiAction::ShowLoading(message) => UiState {
            is_loading: true,
            loading_message: message.clone(),
            ..current
        },
        UiAction::HideLoading => UiState {
            is_loading: false,
            ..current
        },
        UiAction::ShowSubLoading => UiState {
            is_sub_loading: true,
            ..current
        },
        UiAction::HideSubLoading => UiState {
            is_sub_loading: false,
            ..current
        },

        UiAction::DisplayWarning(message) => UiState {
            warning: message.clone(),
            is_loading: false,
            ..current
        },
        UiAction::HideWarning => UiState {
            warning: None,
            ..current
        },

        UiAction::ShowPrivateKey(private_key) => UiState {
            account_detail: AccountDetail::exported(private_key.clone()),
            ..current
        },

        UiAction::PairUpdate(update) => {
            let buy_view = rebuild_buy_view(&current.buy_view, update.marketinfo.clone());
            UiState { buy_view, ..current }
        }

        UiAction::ShowQr(qr) => UiState {
            qr_requested: true,
            trans_forward: true,
            qr: Some(qr.clone()),
            ..current
        },
        UiAction::ShowQrView(qr) => UiState {
            current_view: current.current_view.renamed(ScreenName::Qr),
            trans_forward: true,
            qr: Some(qr.clone()),
            ..current
        },

        UiAction::SetMouseUserState(is_mouse_user) => UiState {
            is_mouse_user: *is_mouse_user,
            ..current
        },

        UiAction::GasLoadingStarted => UiState {
            gas_is_loading: true,
            ..current
        },
        UiAction::GasLoadingFinished => UiState {
            gas_is_loading: false,
            ..current
        },

        UiAction::SetNetworkNonce(nonce) => UiState {
            network_nonce: nonce.clone(),
            ..current
        },

        UiAction::SetPreviousProvider(provider) => {
            if provider.as_deref() == Some(LOADING_PROVIDER_SENTINEL) {
                return current;
            }
            UiState {
                last_selected_provider: provider.clone(),
                ..current
            }
        }

        UiAction::SetSelectedSettingsRpcUrl(url) => UiState {
            networks_tab_selected_rpc_url: url.clone(),
            ..current
        },
        UiAction::SetNetworksTabAddMode(add_mode) => UiState {
            networks_tab_is_in_add_mode: *add_mode,
            ..current
        },

        UiAction::LoadingMethodDataStarted => UiState {
            loading_method_data: true,
            ..current
        },
        UiAction::LoadingMethodDataFinished => UiState {
            loading_method_data: false,
            ..current
        },

        UiAction::SetThreeBoxLastUpdated(timestamp) => UiState {
            three_box_last_updated: *timestamp,
            ..current
        },

        UiAction::SetRequestAccountTabs(tabs) => UiState {
            request_account_tabs: tabs.clone(),
            ..current
        },
        UiAction::SetOpenTabIds(tabs) => UiState {
            open_wallet_tabs: tabs.clone(),
            ..current
        },
        UiAction::SetCurrentWindowTab(tab) => UiState {
            current_window_tab: tab.clone(),
            ..current
        },

        UiAction::Unrecognized(_) => current,
    }
}

fn rebuild_buy_view(previous: &BuyView, marketinfo: Option<serde_json::Value>) -> BuyView {
    let coin_options = previous
        .form_view
        .as_ref()
        .and_then(|form| form.coin_options.clone());

    BuyView {
        subview: Some(BUY_PROVIDER_SUBVIEW.to_string()),
        form_view: Some(BuyFormView {
            coinbase: false,
            shapeshift: true,
            marketinfo,
            coin_options,
        }),
        buy_address: previous.buy_address.clone(),
        amount: previous.amount.clone(),
        warning: None,
    }
}

/// Reduces with the default chronological flattener.
pub fn reduce(state: &CombinedState, action: &UiAction) -> UiState {
    UiReducer::<ChronologicalFlattener>::default().reduce(state, action)
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
