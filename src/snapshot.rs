//! The immutable input to every aggregation call.
//!
//! A [`Snapshot`] is a plain bundle of the record sets the upstream store
//! returns. Records reference each other by opaque string id; lookups resolve
//! through the snapshot and fail closed (`None`) when an id has no match, so
//! a dangling reference can never crash a computation.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, AccountId, Budget, CategoryMeta, EngineContext, Investment, Subscription, Transaction,
};
use crate::errors::{EngineError, EngineResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub categories: Vec<CategoryMeta>,
}

impl Snapshot {
    /// Decodes a snapshot from the JSON row sets the host fetched.
    pub fn from_json_str(data: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Resolves an account id, failing closed when nothing matches.
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        let found = self.accounts.iter().find(|account| &account.id == id);
        if found.is_none() {
            tracing::debug!(account = %id, "account lookup failed closed");
        }
        found
    }

    /// Like [`Snapshot::account`], for callers that need a hard failure
    /// instead of an unlinked record.
    pub fn require_account(&self, id: &AccountId) -> EngineResult<&Account> {
        self.account(id)
            .ok_or_else(|| EngineError::InvalidRef(format!("account {id}")))
    }

    /// Accounts visible to the context's viewer.
    pub fn accounts_for(&self, ctx: &EngineContext) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|account| ctx.can_view(&account.owner, account.shared))
            .collect()
    }

    /// Transactions visible to the context's viewer.
    pub fn transactions_for(&self, ctx: &EngineContext) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| ctx.can_view(&txn.owner, txn.shared))
            .collect()
    }

    /// Subscriptions visible to the context's viewer.
    pub fn subscriptions_for(&self, ctx: &EngineContext) -> Vec<&Subscription> {
        self.subscriptions
            .iter()
            .filter(|sub| ctx.can_view(&sub.owner, sub.shared))
            .collect()
    }

    /// Investments visible to the context's viewer.
    pub fn investments_for(&self, ctx: &EngineContext) -> Vec<&Investment> {
        self.investments
            .iter()
            .filter(|inv| ctx.can_view(&inv.owner, inv.shared))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{AccountKind, OwnerId, TransactionKind};

    #[test]
    fn unknown_account_ids_resolve_to_none() {
        let snapshot = Snapshot::default();
        assert!(snapshot.account(&AccountId::new("missing")).is_none());
    }

    #[test]
    fn visibility_filter_hides_unshared_family_records() {
        let mut mine = Account::new("a-1", "Checking", AccountKind::Bank);
        mine.owner = OwnerId::new("me");
        let mut shared = Account::new("a-2", "Joint", AccountKind::Bank);
        shared.owner = OwnerId::new("partner");
        shared.shared = true;
        let mut hidden = Account::new("a-3", "Private", AccountKind::Bank);
        hidden.owner = OwnerId::new("partner");

        let snapshot = Snapshot {
            accounts: vec![mine, shared, hidden],
            ..Snapshot::default()
        };
        let ctx = EngineContext::new("me", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
            .with_family(["partner"]);
        let visible: Vec<_> = snapshot
            .accounts_for(&ctx)
            .into_iter()
            .map(|a| a.id.as_str().to_string())
            .collect();
        assert_eq!(visible, vec!["a-1", "a-2"]);
    }

    #[test]
    fn require_account_reports_the_dangling_id() {
        let snapshot = Snapshot::default();
        let err = snapshot
            .require_account(&AccountId::new("ghost"))
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn json_decode_tolerates_absent_collections() {
        let snapshot = Snapshot::from_json_str(r#"{"accounts": []}"#).unwrap();
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.budgets.is_empty());
    }

    #[test]
    fn json_decode_reads_full_rows() {
        let json = r#"{
            "accounts": [{
                "id": "a-1",
                "name": "Visa",
                "kind": "credit",
                "balance": -1200000.0,
                "credit": {"limit": 5000000.0, "cutoff_day": 20, "payment_day": 5},
                "owner": "me"
            }],
            "transactions": [{
                "id": "t-1",
                "amount": 250000.0,
                "posted_on": "2025-05-14",
                "kind": "expense",
                "category": "Comida",
                "account_id": "a-1",
                "owner": "me"
            }]
        }"#;
        let snapshot = Snapshot::from_json_str(json).unwrap();
        let account = snapshot.account(&AccountId::new("a-1")).unwrap();
        assert!(account.is_credit());
        assert_eq!(account.credit.as_ref().unwrap().cutoff_day, 20);
        assert_eq!(snapshot.transactions[0].kind, TransactionKind::Expense);
    }
}
