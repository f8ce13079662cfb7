//! Aggregation services: pure, synchronous derivations over a snapshot.
//!
//! Every service is a unit struct with associated functions taking
//! `(&Snapshot, &EngineContext, ...)`. Nothing here mutates the snapshot or
//! holds state between calls.

pub mod credit;
pub mod investments;
pub mod net_worth;
pub mod pillars;
pub mod spending;
pub mod upcoming;

pub use credit::{CreditCycle, CreditService, SynthesizedBill};
pub use investments::{InvestmentService, PortfolioSummary};
pub use net_worth::{NetWorthPoint, NetWorthService};
pub use pillars::{PillarService, PillarStatus};
pub use spending::{
    BucketGranularity, CashFlowBucket, CashFlowReport, CategorySlice, MonthlySpend,
    SpendingService,
};
pub use upcoming::{SubscriptionDue, UpcomingPayment, UpcomingService};
