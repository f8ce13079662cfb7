mod common;

use common::*;
use fintrack_core::config::EngineConfig;
use fintrack_core::domain::{EngineContext, OwnerId, TransactionKind};
use fintrack_core::services::{NetWorthService, SpendingService, UpcomingPayment, UpcomingService};
use fintrack_core::snapshot::Snapshot;

#[test]
fn json_rows_flow_end_to_end_into_reports() {
    let json = r#"{
        "accounts": [
            {"id": "b-1", "name": "Checking", "kind": "bank", "balance": 2500000.0,
             "initial_balance": 1000000.0, "owner": "user-1"},
            {"id": "cc-1", "name": "Visa", "kind": "credit", "balance": -800000.0,
             "credit": {"limit": 4000000.0, "cutoff_day": 20, "payment_day": 5},
             "owner": "user-1"}
        ],
        "transactions": [
            {"id": "t-1", "amount": 150000.0, "posted_on": "2025-05-12",
             "kind": "expense", "category": "Comida", "account_id": "b-1", "owner": "user-1"},
            {"id": "t-2", "amount": 90000.0, "posted_on": "garbage-date",
             "kind": "expense", "category": "Ocio", "account_id": "b-1", "owner": "user-1"}
        ],
        "budgets": [{"category": "Food", "limit": 400000.0}]
    }"#;
    let fixture = Snapshot::from_json_str(json).expect("snapshot decodes");
    let context = ctx(date(2025, 5, 21));

    assert_eq!(NetWorthService::total(&fixture, &context), 2_500_000.0 - 800_000.0);

    // The record with the broken date is out of the monthly window but still
    // present in category totals.
    let monthly = SpendingService::monthly(&fixture, &context);
    assert_eq!(monthly.spent, 150_000.0);
    let slices = SpendingService::breakdown(&fixture, &context, TransactionKind::Expense);
    let total: f64 = slices.iter().map(|slice| slice.total).sum();
    assert_eq!(total, 240_000.0);
}

#[test]
fn family_sharing_controls_what_aggregates_see() {
    let mut fixture = snapshot();
    let mut own = bank("b-1", 1_000_000.0, 0.0);
    own.owner = OwnerId::new(USER);
    let mut joint = bank("b-2", 400_000.0, 0.0);
    joint.owner = OwnerId::new("partner");
    joint.shared = true;
    let mut private = bank("b-3", 9_999_999.0, 0.0);
    private.owner = OwnerId::new("partner");
    fixture.accounts = vec![own, joint, private];

    let solo = EngineContext::new(USER, date(2025, 5, 21));
    assert_eq!(NetWorthService::total(&fixture, &solo), 1_000_000.0);

    let family = EngineContext::new(USER, date(2025, 5, 21)).with_family(["partner"]);
    assert_eq!(NetWorthService::total(&fixture, &family), 1_400_000.0);
}

#[test]
fn upcoming_feed_distinguishes_persisted_from_derived_entries() {
    let mut fixture = snapshot();
    fixture.accounts = vec![credit_card("cc-1", -950_000.0, 20, 5)];
    fixture.subscriptions = vec![
        monthly_subscription("s-1", "Netflix", 27_000.0, date(2025, 5, 28)),
        monthly_subscription("s-2", "Gym", 80_000.0, date(2025, 6, 15)),
    ];
    let feed = UpcomingService::payments(&fixture, &ctx(date(2025, 5, 21)), &EngineConfig::default());

    assert_eq!(feed.len(), 3);
    assert!(matches!(feed[0], UpcomingPayment::Subscription(_)));
    assert!(matches!(feed[1], UpcomingPayment::SynthesizedBill(_)));
    assert!(matches!(feed[2], UpcomingPayment::Subscription(_)));
    assert!(feed.windows(2).all(|pair| pair[0].due_date() <= pair[1].due_date()));
}
