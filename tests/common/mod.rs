//! Shared fixture builders for the integration suites.

#![allow(dead_code)]

use chrono::NaiveDate;
use fintrack_core::domain::{
    Account, AccountKind, Budget, CreditTerms, EngineContext, OwnerId, Periodicity, Subscription,
    SubscriptionId, SubscriptionKind, Transaction, TransactionKind,
};
use fintrack_core::snapshot::Snapshot;

pub const USER: &str = "user-1";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ctx(today: NaiveDate) -> EngineContext {
    EngineContext::new(USER, today)
}

pub fn bank(id: &str, balance: f64, initial: f64) -> Account {
    let mut account = Account::new(id, id, AccountKind::Bank);
    account.balance = balance;
    account.initial_balance = initial;
    account.owner = OwnerId::new(USER);
    account
}

pub fn credit_card(id: &str, balance: f64, cutoff_day: u32, payment_day: u32) -> Account {
    let mut account = Account::new(id, id, AccountKind::Credit);
    account.balance = balance;
    account.initial_balance = balance;
    account.credit = Some(CreditTerms {
        limit: 5_000_000.0,
        cutoff_day,
        payment_day,
        handling_fee: 0.0,
    });
    account.owner = OwnerId::new(USER);
    account
}

pub fn transaction(
    id: &str,
    account: &str,
    kind: TransactionKind,
    amount: f64,
    posted: NaiveDate,
    category: &str,
) -> Transaction {
    let mut txn = Transaction::new(id, account, kind, amount, posted);
    txn.category = category.into();
    txn.owner = OwnerId::new(USER);
    txn
}

pub fn monthly_subscription(id: &str, name: &str, amount: f64, next: NaiveDate) -> Subscription {
    Subscription {
        id: SubscriptionId::new(id),
        name: name.into(),
        amount,
        periodicity: Periodicity::Monthly,
        next_payment: Some(next),
        category: "Subscriptions".into(),
        account_id: None,
        kind: SubscriptionKind::Subscription,
        owner: OwnerId::new(USER),
        shared: false,
    }
}

pub fn budget(category: &str, limit: f64) -> Budget {
    Budget::new(category, limit)
}

pub fn snapshot() -> Snapshot {
    Snapshot::default()
}
