use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::common::{shift_month, AccountId, OwnerId, SubscriptionId};

/// A persisted recurring obligation: a subscription proper or a recurring
/// bill. Next due dates for credit-card statements are never persisted; the
/// credit service synthesizes those on the fly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    pub periodicity: Periodicity,
    #[serde(default, deserialize_with = "super::transaction::lenient_date_field")]
    pub next_payment: Option<NaiveDate>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub kind: SubscriptionKind,
    pub owner: OwnerId,
    #[serde(default)]
    pub shared: bool,
}

impl Subscription {
    /// Next due date at or after `reference`, advancing the stored schedule
    /// by whole periods. Returns `None` when the stored date is unusable.
    pub fn next_due_on_or_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let mut due = self.next_payment?;
        let mut guard = 0usize;
        while due < reference {
            due = self.periodicity.advance(due);
            guard += 1;
            if guard >= 1024 {
                tracing::debug!(subscription = %self.id, "schedule failed to advance, skipping");
                return None;
            }
        }
        Some(due)
    }
}

/// Persisted kinds only; synthesized credit-card bills live in their own
/// variant of the upcoming-payments report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionKind {
    #[default]
    Subscription,
    RecurringBill,
}

/// Supported billing cadences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Biannual,
    Yearly,
}

impl Periodicity {
    /// The next occurrence after `from`. Month-based cadences clamp the day
    /// to the target month's length.
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Periodicity::Daily => from + Duration::days(1),
            Periodicity::Weekly => from + Duration::weeks(1),
            Periodicity::Biweekly => from + Duration::weeks(2),
            Periodicity::Monthly => shift_month(from, 1),
            Periodicity::Quarterly => shift_month(from, 3),
            Periodicity::Biannual => shift_month(from, 6),
            Periodicity::Yearly => shift_month(from, 12),
        }
    }
}
