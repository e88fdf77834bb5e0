//! Navigation and overlay state for the wallet popup.
//!
//! [`UiReducer::reduce`] maps a combined wallet/UI state and one [`UiAction`]
//! to the next [`UiState`]. It performs no I/O and never fails; malformed
//! events are rejected earlier, when a [`RawAction`](shared::protocol::RawAction)
//! is converted into a [`UiAction`].

pub mod action;
pub mod pending;
pub mod reducer;
pub mod state;

pub use action::{HdPathUpdate, ModalRequest, PairUpdate, SidebarPayload, UiAction};
pub use pending::{
    ChronologicalFlattener, CombinedState, PendingActionFlattener, PendingQueues, WalletSnapshot,
};
pub use reducer::{reduce, DerivedDefaults, UiReducer};
pub use state::{
    AccountDetail, AccountExport, AccountSubview, CurrentView, ModalStack, ModalState, QrPayload,
    Sidebar, UiSnapshot, UiState, ViewContext,
};
