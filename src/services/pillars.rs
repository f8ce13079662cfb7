//! Needs/wants/savings pillar analysis.

use serde::{Deserialize, Serialize};

use crate::domain::{category, safe_ratio, DateWindow, EngineContext, Pillar};
use crate::snapshot::Snapshot;

/// Budget target versus actual spend for one pillar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PillarStatus {
    pub pillar: Pillar,
    /// Sum of budget limits whose category maps to this pillar.
    pub target: f64,
    /// Expense spend in the analyzed window.
    pub actual: f64,
    /// `actual / target * 100`; 0 when nothing is targeted, uncapped.
    pub utilization_percent: f64,
}

/// Partitions spending into the three strategy pillars.
pub struct PillarService;

impl PillarService {
    /// Computes per-pillar target, actual and utilization for the window.
    /// Categories missing from the assignment table land in Wants, so no
    /// expense ever escapes the partition.
    pub fn analyze(snapshot: &Snapshot, ctx: &EngineContext, window: &DateWindow) -> Vec<PillarStatus> {
        let mut targets = [0.0_f64; 3];
        let mut actuals = [0.0_f64; 3];

        for budget in &snapshot.budgets {
            let pillar = category::pillar_for(&budget.canonical_category());
            targets[Self::slot(pillar)] += budget.effective_limit();
        }

        for txn in snapshot.transactions_for(ctx) {
            if !txn.is_expense() {
                continue;
            }
            let Some(date) = txn.posted_on else {
                continue;
            };
            if !window.contains(date) {
                continue;
            }
            let pillar = category::pillar_for(&category::canonicalize(&txn.category));
            actuals[Self::slot(pillar)] += txn.magnitude();
        }

        Pillar::ALL
            .into_iter()
            .map(|pillar| {
                let slot = Self::slot(pillar);
                PillarStatus {
                    pillar,
                    target: targets[slot],
                    actual: actuals[slot],
                    utilization_percent: safe_ratio(actuals[slot], targets[slot]) * 100.0,
                }
            })
            .collect()
    }

    /// Pillar analysis for the calendar month containing `ctx.today`.
    pub fn analyze_current_month(snapshot: &Snapshot, ctx: &EngineContext) -> Vec<PillarStatus> {
        Self::analyze(snapshot, ctx, &DateWindow::month_of(ctx.today))
    }

    fn slot(pillar: Pillar) -> usize {
        match pillar {
            Pillar::Needs => 0,
            Pillar::Wants => 1,
            Pillar::Savings => 2,
        }
    }
}
