//! Credit-card billing cycle projection.
//!
//! Each credit account is treated as a small state machine driven by two
//! recurring day-of-month facts: the statement cutoff and the payment due
//! day. Both clamp to the last day of short months, and a payment day that
//! is numerically at or before the cutoff day always means next month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{
    clamped_day, safe_ratio, shift_month, Account, AccountId, EngineContext, Transaction,
    TransactionKind,
};
use crate::snapshot::Snapshot;

/// A computed, never-persisted upcoming statement payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesizedBill {
    pub account_id: AccountId,
    pub account_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

/// The open billing period of one credit account, as of "today".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCycle {
    pub account_id: AccountId,
    pub account_name: String,
    /// Most recent cutoff date at or before today.
    pub period_start: NaiveDate,
    /// Next cutoff date after today.
    pub period_end: NaiveDate,
    /// Liability including everything posted, billed or not.
    pub real_balance: f64,
    /// Liability as of the last cutoff; post-cutoff activity excluded.
    pub statement_balance: f64,
    /// When the statement balance falls due.
    pub due_date: NaiveDate,
    /// `real_balance / limit`; 0 when no limit is stored, may exceed 1.
    pub utilization: f64,
    /// `limit - real_balance`; negative when the card is over limit.
    pub available_credit: f64,
    pub handling_fee: f64,
    /// Present only when the statement closed with debt.
    pub bill: Option<SynthesizedBill>,
}

/// Projects billing-cycle state for credit accounts.
pub struct CreditService;

impl CreditService {
    /// Cycle state for every visible credit account, in snapshot order.
    pub fn cycles(snapshot: &Snapshot, ctx: &EngineContext) -> Vec<CreditCycle> {
        snapshot
            .accounts_for(ctx)
            .into_iter()
            .filter_map(|account| Self::cycle(snapshot, ctx, account))
            .collect()
    }

    /// Cycle state for one account; `None` for non-credit accounts.
    pub fn cycle(snapshot: &Snapshot, ctx: &EngineContext, account: &Account) -> Option<CreditCycle> {
        if !account.is_credit() {
            return None;
        }
        let terms = account.credit.clone().unwrap_or_default();
        if terms.cutoff_day == 0 {
            tracing::debug!(account = %account.id, "credit account without cutoff day, using day 1");
        }
        let cutoff_day = terms.cutoff_day.max(1);
        let payment_day = terms.payment_day.max(1);

        let period_start = last_cutoff(ctx.today, cutoff_day);
        let period_end = cutoff_in(shift_month(period_start, 1), cutoff_day);
        let due_date = payment_after(period_start, payment_day);

        let real_balance = account.balance.abs();
        let post_cutoff_delta: f64 = snapshot
            .transactions_for(ctx)
            .into_iter()
            .filter(|txn| txn.touches_account(&account.id))
            .filter_map(|txn| txn.posted_on.map(|date| (txn, date)))
            .filter(|(_, date)| *date > period_start)
            .map(|(txn, _)| liability_effect(txn, &account.id))
            .sum();
        let statement_balance = real_balance - post_cutoff_delta;

        let limit = if terms.limit.is_finite() { terms.limit } else { 0.0 };
        let bill = (statement_balance > 0.0).then(|| SynthesizedBill {
            account_id: account.id.clone(),
            account_name: account.name.clone(),
            amount: statement_balance,
            due_date,
        });

        Some(CreditCycle {
            account_id: account.id.clone(),
            account_name: account.name.clone(),
            period_start,
            period_end,
            real_balance,
            statement_balance,
            due_date,
            utilization: safe_ratio(real_balance, limit),
            available_credit: limit - real_balance,
            handling_fee: terms.handling_fee,
            bill,
        })
    }
}

/// Signed effect of one transaction on this card's liability. Expenses grow
/// the debt, income shrinks it, and a payment or transfer touching the card
/// pays it down.
fn liability_effect(txn: &Transaction, account: &AccountId) -> f64 {
    match txn.kind {
        TransactionKind::Expense if &txn.account_id == account => txn.magnitude(),
        TransactionKind::Income if &txn.account_id == account => -txn.magnitude(),
        TransactionKind::Payment | TransactionKind::Transfer => -txn.magnitude(),
        _ => 0.0,
    }
}

/// The cutoff date in the month of `reference`, clamped to month length.
fn cutoff_in(reference: NaiveDate, cutoff_day: u32) -> NaiveDate {
    clamped_day(reference.year(), reference.month(), cutoff_day)
}

/// Most recent cutoff date at or before `today`.
fn last_cutoff(today: NaiveDate, cutoff_day: u32) -> NaiveDate {
    let candidate = cutoff_in(today, cutoff_day);
    if candidate <= today {
        candidate
    } else {
        cutoff_in(shift_month(today.with_day(1).unwrap_or(today), -1), cutoff_day)
    }
}

/// First occurrence of `payment_day` strictly after `cutoff`. A payment day
/// at or before the cutoff day rolls into the following month.
fn payment_after(cutoff: NaiveDate, payment_day: u32) -> NaiveDate {
    let same_month = clamped_day(cutoff.year(), cutoff.month(), payment_day);
    if same_month > cutoff {
        same_month
    } else {
        let next = shift_month(cutoff.with_day(1).unwrap_or(cutoff), 1);
        clamped_day(next.year(), next.month(), payment_day)
    }
}
