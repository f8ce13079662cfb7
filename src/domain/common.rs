//! Shared identifiers, the aggregation context, and calendar helpers.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }
    };
}

string_id!(
    /// Opaque upstream identifier for an account.
    AccountId
);
string_id!(
    /// Opaque upstream identifier for a transaction.
    TransactionId
);
string_id!(
    /// Opaque upstream identifier for a subscription.
    SubscriptionId
);
string_id!(
    /// Opaque upstream identifier for an investment position.
    InvestmentId
);
string_id!(
    /// Opaque upstream identifier for a user or family member.
    OwnerId
);

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("COP")
    }
}

/// Ambient facts every aggregation call needs: who is looking and when.
///
/// All date comparisons in the engine are by calendar date; `today` must be
/// derived by the caller in the fixed reporting timezone so cutoff-boundary
/// records classify consistently across hosts.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub user: OwnerId,
    pub family: HashSet<OwnerId>,
    pub today: NaiveDate,
}

impl EngineContext {
    pub fn new(user: impl Into<OwnerId>, today: NaiveDate) -> Self {
        Self {
            user: user.into(),
            family: HashSet::new(),
            today,
        }
    }

    pub fn with_family<I, T>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OwnerId>,
    {
        self.family = members.into_iter().map(Into::into).collect();
        self
    }

    /// A record is visible when the viewer owns it, or a family member owns
    /// it and chose to share it.
    pub fn can_view(&self, owner: &OwnerId, shared: bool) -> bool {
        owner == &self.user || (shared && self.family.contains(owner))
    }
}

impl From<String> for OwnerId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, crate::errors::EngineError> {
        if start > end {
            return Err(crate::errors::EngineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `reference`.
    pub fn month_of(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        let end = end_of_month(reference.year(), reference.month());
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Replaces non-finite intermediate values so NaN never leaks into sums.
pub fn sane(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Divides, reporting 0 instead of NaN or infinity for empty denominators.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    sane(numerator / denominator)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Builds a date on `day` in the given month, clamped to the month's length.
/// A day-31 schedule lands on the 30th (or 28th/29th) in shorter months.
pub fn clamped_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap())
}

/// Shifts a date by whole months, clamping the day to the target month.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    clamped_day(year, month as u32, date.day())
}

/// Last calendar day of the given month.
pub fn end_of_month(year: i32, month: u32) -> NaiveDate {
    clamped_day(year, month, days_in_month(year, month))
}
