use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(PendingActionId);

string_newtype!(Address);
string_newtype!(NetworkId);

/// Top-level screens the wallet popup can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenName {
    #[serde(rename = "accounts")]
    Accounts,
    #[serde(rename = "accountDetail")]
    AccountDetail,
    #[serde(rename = "confTx")]
    ConfTx,
    #[serde(rename = "config")]
    Config,
    #[serde(rename = "add-token")]
    AddToken,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "sendTransaction")]
    SendTransaction,
    #[serde(rename = "sendToken")]
    SendToken,
    #[serde(rename = "restoreVault")]
    RestoreVault,
    #[serde(rename = "qr")]
    Qr,
}

impl ScreenName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::AccountDetail => "accountDetail",
            Self::ConfTx => "confTx",
            Self::Config => "config",
            Self::AddToken => "add-token",
            Self::Info => "info",
            Self::SendTransaction => "sendTransaction",
            Self::SendToken => "sendToken",
            Self::RestoreVault => "restoreVault",
            Self::Qr => "qr",
        }
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingActionKind {
    Transaction,
    Message,
    PersonalMessage,
    TypedMessage,
}

/// An unapproved request as it sits in one of the wallet's pending queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    pub id: PendingActionId,
    #[serde(default)]
    pub time: i64,
    /// Only transactions carry the network they were created on. The
    /// transaction controller publishes it as `metamaskNetworkId`.
    #[serde(
        default,
        alias = "metamaskNetworkId",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_id: Option<NetworkId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub id: PendingActionId,
    pub time: i64,
    pub kind: PendingActionKind,
}
