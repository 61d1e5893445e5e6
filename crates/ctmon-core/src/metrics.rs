//! Metric engine: pure formulas from raw field values to productivity
//! figures.
//!
//! Each formula is guarded independently so a partially filled form
//! yields well-defined zeros instead of NaN or infinity.

use crate::models::{DerivedMetrics, RawInputs, RawValue};

/// Bucket/bank-volume conversion factor for the covered equipment class
/// (bcm per loader working-minute ratio).
pub const BUCKET_FACTOR_BCM: f64 = 42.0;

const SECS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Parse one raw field into a strictly positive finite number.
///
/// Tolerates surrounding whitespace and a decimal comma (`"3,5"` → 3.5).
/// Anything else non-numeric, and any zero or negative value, counts as
/// unset.
pub fn parse_positive(value: &RawValue) -> Option<f64> {
    let n = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.contains(',') && !trimmed.contains('.') {
                trimmed.replace(',', ".").parse::<f64>().ok()?
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
    };
    (n.is_finite() && n > 0.0).then_some(n)
}

/// Minutes to fill one hauler: `(cycle time [s] * passes) / 60`.
pub fn loading_time(cycletime_loader: &RawValue, jumlah_passing: &RawValue) -> f64 {
    match (parse_positive(cycletime_loader), parse_positive(jumlah_passing)) {
        (Some(cycle_secs), Some(passes)) => (cycle_secs * passes) / SECS_PER_MINUTE,
        _ => 0.0,
    }
}

/// Loader productivity in bcm/jam: `42 * (working time / loading time)`.
pub fn productivity_loader(waktu_kerja_loader: &RawValue, loading_time: f64) -> f64 {
    match parse_positive(waktu_kerja_loader) {
        Some(work_minutes) if loading_time > 0.0 => {
            BUCKET_FACTOR_BCM * (work_minutes / loading_time)
        }
        _ => 0.0,
    }
}

/// Hauler productivity in bcm/jam/km: `(42 * 60) / (cycle time * distance factor)`.
pub fn productivity_hauler(cycletime_hauler: &RawValue, konversi_jarak: &RawValue) -> f64 {
    match (parse_positive(cycletime_hauler), parse_positive(konversi_jarak)) {
        (Some(cycle_minutes), Some(distance_km)) => {
            (BUCKET_FACTOR_BCM * MINUTES_PER_HOUR) / (cycle_minutes * distance_km)
        }
        _ => 0.0,
    }
}

/// Fleet match factor: `(hauler count * hauler productivity) / loader productivity`.
pub fn match_factor(
    jumlah_hd: &RawValue,
    productivity_hauler: f64,
    productivity_loader: f64,
) -> f64 {
    match parse_positive(jumlah_hd) {
        Some(hauler_count) if productivity_hauler > 0.0 && productivity_loader > 0.0 => {
            (hauler_count * productivity_hauler) / productivity_loader
        }
        _ => 0.0,
    }
}

impl DerivedMetrics {
    /// Recompute all four metrics from the raw form fields.
    pub fn compute(inputs: &RawInputs) -> Self {
        let loading_time = loading_time(&inputs.cycletime_loader, &inputs.jumlah_passing);
        let productivity_loader = productivity_loader(&inputs.waktu_kerja_loader, loading_time);
        let productivity_hauler =
            productivity_hauler(&inputs.cycletime_hauler, &inputs.konversi_jarak);
        let match_factor = match_factor(&inputs.jumlah_hd, productivity_hauler, productivity_loader);
        Self {
            loading_time,
            productivity_loader,
            productivity_hauler,
            match_factor,
        }
    }
}
