use serde::Serialize;
use volcano_core::{CycleCounters, DisplayMode, Selection};

/// Multiple of the page's configured stress count a bridge call may request.
pub const STRESS_REQUEST_CAP_FACTOR: usize = 10;

#[derive(Debug, Serialize)]
pub struct BridgeState {
    pub mode: DisplayMode,
    pub selection: Option<Selection>,
    pub generation: u64,
    pub bound_choices: usize,
    pub bound_listeners: usize,
    pub counters: CycleCounters,
}

/// Recompute count for `stress(n)`.
///
/// A missing or non-numeric `n` runs the configured count. Fractions are
/// truncated, negatives run nothing, and anything above
/// `configured * STRESS_REQUEST_CAP_FACTOR` is capped there.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn stress_request(requested: Option<f64>, configured: usize) -> usize {
    let cap = configured.saturating_mul(STRESS_REQUEST_CAP_FACTOR).max(1);
    match requested {
        None => configured,
        Some(n) if n.is_nan() => configured,
        Some(n) if n < 1.0 => 0,
        Some(n) if n >= cap as f64 => cap,
        Some(n) => n.trunc() as usize,
    }
}
