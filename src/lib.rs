#![doc(test(attr(deny(warnings))))]

//! Fintrack Core derives dashboard-ready financial views (net worth, budget
//! usage, credit-card cycles, cash flow) from immutable snapshots of a
//! personal-finance data store.
//!
//! The engine performs no I/O and never mutates its inputs: callers fetch a
//! [`snapshot::Snapshot`], build an [`domain::EngineContext`] for the viewing
//! user, and invoke the services under [`services`]. Every computation is a
//! pure function of those two values, so repeated or concurrent calls over
//! the same snapshot always agree.

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod snapshot;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
