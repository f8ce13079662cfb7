use serde::{Deserialize, Serialize};

use super::common::{AccountId, CurrencyCode, OwnerId};

/// A money container supplied by the upstream store.
///
/// Balances arrive as signed decimals; credit accounts conventionally carry
/// debt as a negative balance, but the engine tolerates either sign and
/// always folds credit balances in as liabilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub initial_balance: f64,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<CreditTerms>,
    pub owner: OwnerId,
    #[serde(default)]
    pub shared: bool,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            balance: 0.0,
            initial_balance: 0.0,
            currency: CurrencyCode::default(),
            credit: None,
            owner: OwnerId::new("unowned"),
            shared: false,
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self.kind, AccountKind::Credit)
    }

    /// Signed contribution of this account to net worth. Credit balances are
    /// liabilities regardless of the stored sign.
    pub fn net_worth_effect(&self) -> f64 {
        if self.is_credit() {
            -self.balance.abs()
        } else {
            self.balance
        }
    }

    /// Same folding applied to the initial balance, used as the history
    /// reconstruction baseline.
    pub fn initial_net_worth_effect(&self) -> f64 {
        if self.is_credit() {
            -self.initial_balance.abs()
        } else {
            self.initial_balance
        }
    }
}

/// Supported account kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Bank,
    Cash,
    Credit,
    Investment,
    Wallet,
}

/// Billing facts carried only by credit accounts.
///
/// Upstream rows may omit any of these; absent numerics decode as zero so a
/// single incomplete account cannot blank a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreditTerms {
    #[serde(default)]
    pub limit: f64,
    /// Day of month the statement closes (1-31, clamped in short months).
    #[serde(default)]
    pub cutoff_day: u32,
    /// Day of month the statement balance is due (1-31, clamped).
    #[serde(default)]
    pub payment_day: u32,
    #[serde(default)]
    pub handling_fee: f64,
}
