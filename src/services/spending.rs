//! Spending views: monthly totals, category breakdowns, top expenses, and
//! time-bucketed cash flow.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{
    budget, category, safe_ratio, sane, DateWindow, EngineContext, Transaction, TransactionKind,
};
use crate::snapshot::Snapshot;

/// Spend for the calendar month containing "today", against the total
/// budgeted limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySpend {
    pub spent: f64,
    pub budget_total: f64,
    /// `spent / budget_total`; 0 when nothing is budgeted, may exceed 1.
    pub utilization: f64,
}

/// One category's share of a filtered transaction set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub total: f64,
    pub percent: f64,
    pub color: String,
}

/// Whether cash flow was bucketed per day or per month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BucketGranularity {
    Daily,
    Monthly,
}

/// Income and expense totals for one time bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowBucket {
    /// First day of the bucket: the day itself, or the first of the month.
    pub start: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

/// Chronological cash-flow series plus the granularity that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowReport {
    pub granularity: BucketGranularity,
    pub buckets: Vec<CashFlowBucket>,
}

/// Derives spending views from a snapshot.
pub struct SpendingService;

impl SpendingService {
    /// Expenses posted in the calendar month of `ctx.today`, with the ratio
    /// against the sum of all budget limits.
    pub fn monthly(snapshot: &Snapshot, ctx: &EngineContext) -> MonthlySpend {
        let month = DateWindow::month_of(ctx.today);
        let spent: f64 = snapshot
            .transactions_for(ctx)
            .iter()
            .filter(|txn| txn.is_expense())
            .filter(|txn| txn.posted_on.map(|date| month.contains(date)).unwrap_or(false))
            .map(|txn| txn.magnitude())
            .sum();
        let budget_total = budget::total_limit(&snapshot.budgets);
        MonthlySpend {
            spent,
            budget_total,
            utilization: safe_ratio(spent, budget_total),
        }
    }

    /// Groups a kind-filtered transaction set by canonical category.
    ///
    /// Zero-value groups are dropped; output sorts descending by total with
    /// first-seen order preserved for ties, and percentages are shares of
    /// the filtered total.
    pub fn breakdown(
        snapshot: &Snapshot,
        ctx: &EngineContext,
        kind: TransactionKind,
    ) -> Vec<CategorySlice> {
        let transactions = snapshot.transactions_for(ctx);
        let filtered = transactions.into_iter().filter(|txn| txn.kind == kind);
        Self::slices_from(filtered, &snapshot.categories)
    }

    /// The heaviest expense categories, at most `config.top_expense_limit`.
    pub fn top_expenses(
        snapshot: &Snapshot,
        ctx: &EngineContext,
        config: &EngineConfig,
    ) -> Vec<CategorySlice> {
        let mut slices = Self::breakdown(snapshot, ctx, TransactionKind::Expense);
        slices.truncate(config.top_expense_limit);
        slices
    }

    /// Buckets visible income and expense records by day, or by month when
    /// the observed date span exceeds the configured threshold.
    pub fn cash_flow(
        snapshot: &Snapshot,
        ctx: &EngineContext,
        config: &EngineConfig,
    ) -> CashFlowReport {
        let dated: Vec<(&Transaction, NaiveDate)> = snapshot
            .transactions_for(ctx)
            .into_iter()
            .filter(|txn| txn.is_expense() || txn.is_income())
            .filter_map(|txn| txn.posted_on.map(|date| (txn, date)))
            .collect();

        let Some(span) = dated
            .iter()
            .map(|(_, date)| *date)
            .max()
            .zip(dated.iter().map(|(_, date)| *date).min())
            .map(|(max, min)| (max - min).num_days())
        else {
            return CashFlowReport {
                granularity: BucketGranularity::Daily,
                buckets: Vec::new(),
            };
        };

        let granularity = if span <= config.daily_bucket_span_days {
            BucketGranularity::Daily
        } else {
            BucketGranularity::Monthly
        };

        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for (txn, date) in dated {
            let key = match granularity {
                BucketGranularity::Daily => date,
                BucketGranularity::Monthly => date.with_day(1).unwrap_or(date),
            };
            let entry = buckets.entry(key).or_insert((0.0, 0.0));
            if txn.is_income() {
                entry.0 += txn.magnitude();
            } else {
                entry.1 += txn.magnitude();
            }
        }

        CashFlowReport {
            granularity,
            buckets: buckets
                .into_iter()
                .map(|(start, (income, expense))| CashFlowBucket {
                    start,
                    income,
                    expense,
                })
                .collect(),
        }
    }

    fn slices_from<'a, I>(transactions: I, meta: &[category::CategoryMeta]) -> Vec<CategorySlice>
    where
        I: Iterator<Item = &'a Transaction>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, f64> = HashMap::new();
        for txn in transactions {
            let canonical = category::canonicalize(&txn.category);
            if !totals.contains_key(&canonical) {
                order.push(canonical.clone());
            }
            *totals.entry(canonical).or_insert(0.0) += txn.magnitude();
        }

        let grand_total: f64 = totals.values().copied().map(sane).sum();
        let mut slices: Vec<CategorySlice> = order
            .into_iter()
            .filter_map(|canonical| {
                let total = sane(*totals.get(&canonical).unwrap_or(&0.0));
                if total == 0.0 {
                    return None;
                }
                Some(CategorySlice {
                    color: category::display_color(&canonical, meta),
                    percent: safe_ratio(total, grand_total) * 100.0,
                    category: canonical,
                    total,
                })
            })
            .collect();
        // Stable sort keeps first-seen order for equal totals.
        slices.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
        slices
    }
}
