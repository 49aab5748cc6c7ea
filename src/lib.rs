#![doc(test(attr(deny(warnings))))]

//! Trade Ledger offers the domain entities, balance aggregation, and
//! persistence primitives behind a small trading desk's bookkeeping: asset
//! sales and purchases against external platforms, stock transfers between
//! platforms, fiat transfers between banks, and expense/income entries.

pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trade Ledger tracing initialized.");
    });
}
