//! The upcoming-payments feed: persisted subscriptions merged with bills the
//! credit service synthesizes on the fly.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{EngineContext, SubscriptionId, SubscriptionKind};
use crate::services::credit::{CreditService, SynthesizedBill};
use crate::snapshot::Snapshot;

/// A persisted subscription occurrence falling due inside the horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionDue {
    pub id: SubscriptionId,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub category: String,
    pub kind: SubscriptionKind,
}

/// One entry of the feed. The variant tells consumers whether the record is
/// persisted upstream or derived by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum UpcomingPayment {
    Subscription(SubscriptionDue),
    SynthesizedBill(SynthesizedBill),
}

impl UpcomingPayment {
    pub fn due_date(&self) -> NaiveDate {
        match self {
            UpcomingPayment::Subscription(due) => due.due_date,
            UpcomingPayment::SynthesizedBill(bill) => bill.due_date,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            UpcomingPayment::Subscription(due) => due.amount,
            UpcomingPayment::SynthesizedBill(bill) => bill.amount,
        }
    }
}

/// Projects the payments due within the configured horizon.
pub struct UpcomingService;

impl UpcomingService {
    /// Merges subscription occurrences and synthesized credit bills falling
    /// due in `[today, today + horizon]`, ascending by due date (stable, so
    /// same-day entries keep subscription-before-bill snapshot order).
    pub fn payments(
        snapshot: &Snapshot,
        ctx: &EngineContext,
        config: &EngineConfig,
    ) -> Vec<UpcomingPayment> {
        let horizon_end = ctx.today + Duration::days(config.upcoming_horizon_days);
        let mut feed: Vec<UpcomingPayment> = Vec::new();

        for sub in snapshot.subscriptions_for(ctx) {
            let Some(due_date) = sub.next_due_on_or_after(ctx.today) else {
                continue;
            };
            if due_date > horizon_end {
                continue;
            }
            feed.push(UpcomingPayment::Subscription(SubscriptionDue {
                id: sub.id.clone(),
                name: sub.name.clone(),
                amount: sub.amount,
                due_date,
                category: sub.category.clone(),
                kind: sub.kind,
            }));
        }

        for cycle in CreditService::cycles(snapshot, ctx) {
            let Some(bill) = cycle.bill else {
                continue;
            };
            if bill.due_date > horizon_end {
                continue;
            }
            feed.push(UpcomingPayment::SynthesizedBill(bill));
        }

        feed.sort_by_key(UpcomingPayment::due_date);
        feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Account, AccountKind, CreditTerms, OwnerId, Periodicity, Subscription,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(id: &str, name: &str, next: NaiveDate) -> Subscription {
        Subscription {
            id: SubscriptionId::new(id),
            name: name.into(),
            amount: 27_000.0,
            periodicity: Periodicity::Monthly,
            next_payment: Some(next),
            category: "Subscriptions".into(),
            account_id: None,
            kind: SubscriptionKind::Subscription,
            owner: OwnerId::new("me"),
            shared: false,
        }
    }

    fn credit_card() -> Account {
        let mut account = Account::new("cc-1", "Visa", AccountKind::Credit);
        account.balance = -900_000.0;
        account.credit = Some(CreditTerms {
            limit: 5_000_000.0,
            cutoff_day: 20,
            payment_day: 5,
            handling_fee: 0.0,
        });
        account.owner = OwnerId::new("me");
        account
    }

    #[test]
    fn feed_merges_subscriptions_and_bills_by_due_date() {
        let snapshot = Snapshot {
            accounts: vec![credit_card()],
            subscriptions: vec![
                subscription("s-1", "Netflix", date(2025, 6, 10)),
                subscription("s-2", "Gym", date(2025, 5, 25)),
            ],
            ..Snapshot::default()
        };
        let ctx = EngineContext::new("me", date(2025, 5, 21));
        let feed = UpcomingService::payments(&snapshot, &ctx, &EngineConfig::default());
        let dates: Vec<NaiveDate> = feed.iter().map(UpcomingPayment::due_date).collect();
        assert_eq!(dates, vec![date(2025, 5, 25), date(2025, 6, 5), date(2025, 6, 10)]);
        assert!(matches!(feed[1], UpcomingPayment::SynthesizedBill(_)));
        assert_eq!(feed[1].amount(), 900_000.0);
    }

    #[test]
    fn entries_beyond_the_horizon_are_dropped() {
        let snapshot = Snapshot {
            subscriptions: vec![subscription("s-1", "Insurance", date(2025, 9, 1))],
            ..Snapshot::default()
        };
        let ctx = EngineContext::new("me", date(2025, 5, 21));
        let feed = UpcomingService::payments(&snapshot, &ctx, &EngineConfig::default());
        assert!(feed.is_empty());
    }

    #[test]
    fn overdue_schedules_advance_into_the_horizon() {
        let snapshot = Snapshot {
            subscriptions: vec![subscription("s-1", "Netflix", date(2025, 2, 10))],
            ..Snapshot::default()
        };
        let ctx = EngineContext::new("me", date(2025, 5, 21));
        let feed = UpcomingService::payments(&snapshot, &ctx, &EngineConfig::default());
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].due_date(), date(2025, 6, 10));
    }

    #[test]
    fn settled_cards_contribute_no_bill() {
        let mut account = credit_card();
        account.balance = 0.0;
        let snapshot = Snapshot {
            accounts: vec![account],
            ..Snapshot::default()
        };
        let ctx = EngineContext::new("me", date(2025, 5, 21));
        assert!(UpcomingService::payments(&snapshot, &ctx, &EngineConfig::default()).is_empty());
    }
}
