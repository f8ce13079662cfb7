use serde::{Deserialize, Serialize};

/// Tunable constants for the aggregation services.
///
/// The engine is deliberately single-currency: USD-denominated holdings are
/// folded into the reporting currency through one fixed rate rather than a
/// conversion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// ISO 4217 code of the reporting currency.
    pub currency: String,
    /// Fixed USD -> reporting-currency rate applied to USD holdings.
    pub usd_rate: f64,
    /// Number of categories returned by the top-expenses ranking.
    pub top_expense_limit: usize,
    /// Date spans at or under this many days bucket cash flow daily;
    /// longer spans bucket monthly.
    pub daily_bucket_span_days: i64,
    /// How far ahead the upcoming-payments projection looks.
    pub upcoming_horizon_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: "COP".into(),
            usd_rate: 4000.0,
            top_expense_limit: 5,
            daily_bucket_span_days: 45,
            upcoming_horizon_days: 40,
        }
    }
}

impl EngineConfig {
    /// Loads a config from JSON, falling back to defaults for absent fields.
    pub fn from_json_str(data: &str) -> Result<Self, crate::errors::EngineError> {
        #[derive(Deserialize)]
        struct Partial {
            currency: Option<String>,
            usd_rate: Option<f64>,
            top_expense_limit: Option<usize>,
            daily_bucket_span_days: Option<i64>,
            upcoming_horizon_days: Option<i64>,
        }
        let partial: Partial = serde_json::from_str(data)?;
        let defaults = Self::default();
        Ok(Self {
            currency: partial.currency.unwrap_or(defaults.currency),
            usd_rate: partial.usd_rate.unwrap_or(defaults.usd_rate),
            top_expense_limit: partial.top_expense_limit.unwrap_or(defaults.top_expense_limit),
            daily_bucket_span_days: partial
                .daily_bucket_span_days
                .unwrap_or(defaults.daily_bucket_span_days),
            upcoming_horizon_days: partial
                .upcoming_horizon_days
                .unwrap_or(defaults.upcoming_horizon_days),
        })
    }
}
