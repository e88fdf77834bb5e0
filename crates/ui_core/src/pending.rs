//! Wallet-side input to the reducer and the pending-action flattener.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{
    Address, NetworkId, PendingAction, PendingActionId, PendingActionKind, PendingRequest,
};

use crate::state::{UiSnapshot, UiState};

/// Id-keyed queue as the wallet controller publishes it. Keys iterate in
/// numeric id order, which decides ties between equal timestamps.
pub type PendingQueue = BTreeMap<PendingActionId, PendingRequest>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingQueues {
    pub unapproved_txs: PendingQueue,
    pub unapproved_msgs: PendingQueue,
    pub unapproved_personal_msgs: PendingQueue,
    pub unapproved_typed_messages: PendingQueue,
}

/// Read-only slice of wallet state the reducer consults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletSnapshot {
    pub selected_address: Option<Address>,
    pub network: Option<NetworkId>,
    #[serde(flatten)]
    pub queues: PendingQueues,
}

/// Wallet state plus the previous UI snapshot, if one exists yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedState {
    #[serde(alias = "metamask")]
    pub wallet: WalletSnapshot,
    #[serde(alias = "appState")]
    pub ui: Option<UiSnapshot>,
}

impl CombinedState {
    pub fn new(wallet: WalletSnapshot) -> Self {
        Self { wallet, ui: None }
    }

    pub fn with_ui(mut self, ui: UiState) -> Self {
        self.set_ui(ui);
        self
    }

    pub fn set_ui(&mut self, ui: UiState) {
        self.ui = Some(UiSnapshot::Live(ui));
    }

    /// The previous UI state if this process produced it.
    pub fn live_ui(&self) -> Option<&UiState> {
        self.ui.as_ref().and_then(UiSnapshot::live)
    }
}

/// Produces the ordered list of actions awaiting user approval.
///
/// Ordering and network filtering belong to the implementation; the reducer
/// only looks at ids and positions.
pub trait PendingActionFlattener {
    fn flatten(&self, queues: &PendingQueues, network: Option<&NetworkId>) -> Vec<PendingAction>;
}

/// Transactions for the current network first, then every message queue,
/// stable-sorted by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronologicalFlattener;

impl PendingActionFlattener for ChronologicalFlattener {
    fn flatten(&self, queues: &PendingQueues, network: Option<&NetworkId>) -> Vec<PendingAction> {
        let txs = queues.unapproved_txs.values().filter(|tx| match network {
            Some(network) => tx.network_id.as_ref() == Some(network),
            None => true,
        });

        let mut actions: Vec<PendingAction> = txs
            .map(|request| to_action(request, PendingActionKind::Transaction))
            .chain(
                queues
                    .unapproved_msgs
                    .values()
                    .map(|request| to_action(request, PendingActionKind::Message)),
            )
            .chain(
                queues
                    .unapproved_personal_msgs
                    .values()
                    .map(|request| to_action(request, PendingActionKind::PersonalMessage)),
            )
            .chain(
                queues
                    .unapproved_typed_messages
                    .values()
                    .map(|request| to_action(request, PendingActionKind::TypedMessage)),
            )
            .collect();

        actions.sort_by_key(|action| action.time);
        actions
    }
}

fn to_action(request: &PendingRequest, kind: PendingActionKind) -> PendingAction {
    PendingAction {
        id: request.id,
        time: request.time,
        kind,
    }
}

#[cfg(test)]
#[path = "tests/pending_tests.rs"]
mod tests;
