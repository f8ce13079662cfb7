use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{sane, AccountId, InvestmentId, OwnerId};

/// A held position. Stock, ETF and crypto positions are USD-denominated and
/// converted into the reporting currency by the fixed configured rate; the
/// remaining kinds are already local.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: InvestmentId,
    pub name: String,
    pub kind: InvestmentKind,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "super::transaction::lenient_date_field")]
    pub purchased_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    pub owner: OwnerId,
    #[serde(default)]
    pub shared: bool,
}

impl Investment {
    fn fx_factor(&self, usd_rate: f64) -> f64 {
        if self.kind.usd_denominated() {
            usd_rate
        } else {
            1.0
        }
    }

    /// Market value in the reporting currency, falling back to the purchase
    /// price when no current quote is stored.
    pub fn market_value(&self, usd_rate: f64) -> f64 {
        let price = self.current_price.unwrap_or(self.purchase_price);
        sane(self.quantity * price * self.fx_factor(usd_rate))
    }

    /// Cost basis in the reporting currency.
    pub fn cost_basis(&self, usd_rate: f64) -> f64 {
        sane(self.quantity * self.purchase_price * self.fx_factor(usd_rate))
    }
}

/// Supported asset classes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentKind {
    Stock,
    Etf,
    Crypto,
    Bond,
    RealEstate,
    Other,
}

impl InvestmentKind {
    pub fn usd_denominated(&self) -> bool {
        matches!(
            self,
            InvestmentKind::Stock | InvestmentKind::Etf | InvestmentKind::Crypto
        )
    }
}
