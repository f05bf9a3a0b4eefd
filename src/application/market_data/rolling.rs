//! Trailing-window statistics with an explicit warm-up contract.
//!
//! A value at position `t` is defined only when the `window` consecutive
//! positions ending at `t` (inclusive) are all defined; otherwise it is
//! NaN. Off-by-one changes here silently corrupt every indicator built on
//! top, so the window arithmetic is kept in one place.

use statrs::statistics::{Data, Distribution};

fn rolling_apply(values: &[f64], window: usize, stat: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for t in (window - 1)..values.len() {
        let w = &values[t + 1 - window..=t];
        if w.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[t] = stat(w);
    }
    out
}

/// Rolling arithmetic mean over a trailing window
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        Data::new(w.to_vec()).mean().unwrap_or(f64::NAN)
    })
}

/// Rolling sample standard deviation (denominator `window - 1`)
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        Data::new(w.to_vec()).std_dev().unwrap_or(f64::NAN)
    })
}

/// Rolling maximum over a trailing window
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}
