//! Domain models and shared helpers for the aggregation engine.
//!
//! Everything here is a read-only snapshot type: lifecycle and persistence
//! belong to the upstream store, the engine only derives views.

pub mod account;
pub mod budget;
pub mod category;
pub mod common;
pub mod investment;
pub mod subscription;
pub mod transaction;

pub use account::{Account, AccountKind, CreditTerms};
pub use budget::Budget;
pub use category::{CategoryMeta, Pillar};
pub use common::{
    clamped_day, days_in_month, end_of_month, safe_ratio, sane, shift_month, AccountId,
    CurrencyCode, DateWindow, EngineContext, InvestmentId, OwnerId, SubscriptionId, TransactionId,
};
pub use investment::{Investment, InvestmentKind};
pub use subscription::{Periodicity, Subscription, SubscriptionKind};
pub use transaction::{Installment, Transaction, TransactionKind};
