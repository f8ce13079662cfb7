//! Portfolio valuation in the reporting currency.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{safe_ratio, EngineContext};
use crate::snapshot::Snapshot;

/// Aggregate position of the visible portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub market_value: f64,
    pub cost_basis: f64,
    pub unrealized_gain: f64,
    /// `unrealized_gain / cost_basis * 100`; 0 when the basis is empty.
    pub return_percent: f64,
    pub positions: usize,
}

/// Values investment holdings against the fixed FX rate.
pub struct InvestmentService;

impl InvestmentService {
    pub fn portfolio(
        snapshot: &Snapshot,
        ctx: &EngineContext,
        config: &EngineConfig,
    ) -> PortfolioSummary {
        let positions = snapshot.investments_for(ctx);
        let market_value: f64 = positions
            .iter()
            .map(|inv| inv.market_value(config.usd_rate))
            .sum();
        let cost_basis: f64 = positions
            .iter()
            .map(|inv| inv.cost_basis(config.usd_rate))
            .sum();
        let unrealized_gain = market_value - cost_basis;
        PortfolioSummary {
            market_value,
            cost_basis,
            unrealized_gain,
            return_percent: safe_ratio(unrealized_gain, cost_basis) * 100.0,
            positions: positions.len(),
        }
    }
}
