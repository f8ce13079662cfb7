use serde::{Deserialize, Serialize};

use super::category::canonicalize;

/// A spending guardrail for a free-text category label.
///
/// Budgets carry no identifier; several rows for the same category are
/// additive when aggregated rather than overwriting each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: String,
    #[serde(default)]
    pub limit: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }

    /// Limit with non-finite or negative upstream values coerced to zero.
    pub fn effective_limit(&self) -> f64 {
        if self.limit.is_finite() && self.limit > 0.0 {
            self.limit
        } else {
            0.0
        }
    }

    pub fn canonical_category(&self) -> String {
        canonicalize(&self.category)
    }
}

/// Sum of all effective limits; duplicate categories stack.
pub fn total_limit(budgets: &[Budget]) -> f64 {
    budgets.iter().map(Budget::effective_limit).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_categories_are_additive() {
        let budgets = vec![
            Budget::new("Food", 300000.0),
            Budget::new("Comida", 200000.0),
            Budget::new("Transport", 100000.0),
        ];
        assert_eq!(total_limit(&budgets), 600000.0);
    }

    #[test]
    fn bad_limits_count_as_zero() {
        let budgets = vec![Budget::new("Food", f64::NAN), Budget::new("Rent", -5.0)];
        assert_eq!(total_limit(&budgets), 0.0);
    }
}
