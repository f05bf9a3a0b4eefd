//! Recursive exponential smoothing filters.
//!
//! Every filter here is a strict left-to-right fold carrying one
//! accumulator; positions cannot be computed independently.

/// Exponential moving average with an explicit smoothing factor.
///
/// `y[0] = x[0]`; `y[t] = alpha*x[t] + (1-alpha)*y[t-1]`. The output is
/// anchored at the first input element with no warm-up bias correction, so
/// every position is defined when the input is. A NaN input poisons that
/// position and everything after it; gapped series belong in the rolling
/// operators, not here.
pub fn ema(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &x in values {
        let y = match prev {
            None => x,
            Some(p) => alpha * x + (1.0 - alpha) * p,
        };
        out.push(y);
        prev = Some(y);
    }
    out
}

/// Span-parameterized EMA: `alpha = 2 / (span + 1)`
pub fn ema_span(values: &[f64], span: usize) -> Vec<f64> {
    ema(values, 2.0 / (span as f64 + 1.0))
}

/// Wilder's smoothing: `alpha = 1 / period`
pub fn ema_wilder(values: &[f64], period: usize) -> Vec<f64> {
    ema(values, 1.0 / period as f64)
}
