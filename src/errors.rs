use thiserror::Error;

/// Error type for the crate's fallible seams.
///
/// Aggregation itself is total: bad numerics coerce to zero, a record with an
/// unparseable date is excluded from time-bucketed views, and divisions by
/// zero report zero. Errors only surface while decoding a snapshot or when a
/// caller passes a reference the snapshot cannot resolve.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// Convenience alias used across the services layer.
pub type EngineResult<T> = Result<T, EngineError>;
