//! Net worth: the current scalar and its daily historical reconstruction.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{sane, DateWindow, EngineContext};
use crate::snapshot::Snapshot;

/// One day of the reconstructed net-worth series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetWorthPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Derives current net worth and its history from a snapshot.
pub struct NetWorthService;

impl NetWorthService {
    /// Sum of visible account balances, credit folded in as a liability.
    /// Empty input yields 0; the sum is order-invariant.
    pub fn total(snapshot: &Snapshot, ctx: &EngineContext) -> f64 {
        snapshot
            .accounts_for(ctx)
            .iter()
            .map(|account| sane(account.net_worth_effect()))
            .sum()
    }

    /// Dense daily net-worth series from the earliest dated transaction to
    /// today. The baseline is the sum of initial balances; income adds,
    /// expenses subtract, transfers and payments net against both legs. Days
    /// without activity carry the prior value forward.
    pub fn history(snapshot: &Snapshot, ctx: &EngineContext) -> Vec<NetWorthPoint> {
        let baseline: f64 = snapshot
            .accounts_for(ctx)
            .iter()
            .map(|account| sane(account.initial_net_worth_effect()))
            .sum();

        let mut deltas: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for txn in snapshot.transactions_for(ctx) {
            let Some(date) = txn.posted_on else {
                continue;
            };
            if date > ctx.today {
                continue;
            }
            *deltas.entry(date).or_insert(0.0) += txn.net_worth_delta();
        }

        let Some((&first, _)) = deltas.iter().next() else {
            return vec![NetWorthPoint {
                date: ctx.today,
                value: baseline,
            }];
        };

        let mut series = Vec::new();
        let mut running = baseline;
        let mut day = first;
        while day <= ctx.today {
            if let Some(delta) = deltas.get(&day) {
                running += delta;
            }
            series.push(NetWorthPoint {
                date: day,
                value: running,
            });
            day += Duration::days(1);
        }
        series
    }

    /// The history series restricted to a display window. The running total
    /// is always replayed from the true start, so the first value inside the
    /// window is numerically identical to the full series at that date.
    pub fn history_window(
        snapshot: &Snapshot,
        ctx: &EngineContext,
        window: &DateWindow,
    ) -> Vec<NetWorthPoint> {
        Self::history(snapshot, ctx)
            .into_iter()
            .filter(|point| window.contains(point.date))
            .collect()
    }
}
