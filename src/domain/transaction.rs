use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::common::{AccountId, OwnerId, TransactionId};

/// A posted movement of money.
///
/// Amounts are stored as non-negative magnitudes; the sign of their effect is
/// implied by [`TransactionKind`]. `posted_on` is `None` when the upstream
/// date failed to parse, which excludes the record from time-bucketed views
/// without aborting the whole aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_date_field")]
    pub posted_on: Option<NaiveDate>,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Installment>,
    pub owner: OwnerId,
    #[serde(default)]
    pub shared: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        account_id: impl Into<AccountId>,
        kind: TransactionKind,
        amount: f64,
        posted_on: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            posted_on: Some(posted_on),
            kind,
            category: String::new(),
            account_id: account_id.into(),
            related_account_id: None,
            installment: None,
            owner: OwnerId::new("unowned"),
            shared: false,
        }
    }

    /// Magnitude with non-finite or negative upstream values coerced to a
    /// usable non-negative number.
    pub fn magnitude(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount.abs()
        } else {
            0.0
        }
    }

    /// Signed effect on net worth. Transfers and payments move money between
    /// two visible legs, so they net to zero here.
    pub fn net_worth_delta(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.magnitude(),
            TransactionKind::Expense => -self.magnitude(),
            TransactionKind::Transfer | TransactionKind::Payment => 0.0,
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    /// True when this record either posts to or pays down `account`.
    pub fn touches_account(&self, account: &AccountId) -> bool {
        &self.account_id == account || self.related_account_id.as_ref() == Some(account)
    }
}

/// Supported transaction kinds. `Payment` is a transfer that settles a
/// credit-card statement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
    Transfer,
    Payment,
}

/// Position of a charge inside an installment plan, e.g. 3 of 12.
///
/// Display-only: the full amount bills in the month it posts, the plan is
/// never amortized across future statements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Installment {
    pub index: u32,
    pub count: u32,
}

impl Installment {
    pub fn label(&self) -> String {
        format!("{}/{}", self.index, self.count)
    }
}

/// Accepts ISO-8601 dates, optionally with a trailing time component, and
/// turns anything unparseable into `None`.
pub(crate) fn lenient_date_field<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_iso_date))
}

pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(raw, "dropping unparseable transaction date");
            None
        }
    }
}
