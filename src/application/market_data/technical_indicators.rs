//! Per-indicator formulas for the pipeline battery.
//!
//! All functions take plain float slices (already resolved from the table)
//! and return one output value per input row. NaN marks undefined
//! positions; degenerate arithmetic (zero denominators) is left to IEEE
//! semantics so the resulting sentinel propagates downstream unchanged.

use super::rolling::{rolling_max, rolling_mean, rolling_std};
use super::smoothing::{ema_span, ema_wilder};

/// Relative Strength Index over Wilder-smoothed average gain/loss.
///
/// The first delta does not exist and contributes no gain or loss. While
/// both averages are zero the ratio is 0/0 and RSI is NaN; once only the
/// loss average is zero, `rs` is +inf and RSI saturates at 100.
pub fn rsi(close: &[f64], period: usize) -> Vec<f64> {
    let n = close.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for t in 1..n {
        let delta = close[t] - close[t - 1];
        if delta > 0.0 {
            gains[t] = delta;
        } else if delta < 0.0 {
            losses[t] = -delta;
        }
    }
    let avg_gain = ema_wilder(&gains, period);
    let avg_loss = ema_wilder(&losses, period);
    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            let rs = gain / loss;
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}

/// MACD line, signal line and histogram.
///
/// All three are defined from the first row because the underlying EMAs
/// anchor at the first element.
pub fn macd(
    close: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let ema_fast = ema_span(close, fast);
    let ema_slow = ema_span(close, slow);
    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_span(&macd_line, signal);
    let hist = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();
    (macd_line, signal_line, hist)
}

/// Annualized historical volatility: rolling sample std of log returns
/// scaled by `sqrt(trading_days)`. Undefined for the first `window` rows
/// (the first log return is already undefined).
pub fn historical_volatility(close: &[f64], window: usize, trading_days: f64) -> Vec<f64> {
    let n = close.len();
    let mut log_ret = vec![f64::NAN; n];
    for t in 1..n {
        log_ret[t] = (close[t] / close[t - 1]).ln();
    }
    let annualize = trading_days.sqrt();
    rolling_std(&log_ret, window)
        .into_iter()
        .map(|s| s * annualize)
        .collect()
}

/// Bollinger bands: rolling mean plus/minus `num_std` rolling sample stds.
pub fn bollinger(close: &[f64], window: usize, num_std: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mid = rolling_mean(close, window);
    let sd = rolling_std(close, window);
    let upper = mid.iter().zip(&sd).map(|(m, s)| m + num_std * s).collect();
    let lower = mid.iter().zip(&sd).map(|(m, s)| m - num_std * s).collect();
    (mid, upper, lower)
}

/// Average True Range as a simple rolling mean of true range.
///
/// The first row has no previous close, so its true range degrades to
/// `high - low`. The smoothing is a plain rolling mean, not Wilder's
/// filter.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = close.len();
    let mut tr = Vec::with_capacity(n);
    for t in 0..n {
        let range = high[t] - low[t];
        if t == 0 {
            tr.push(range);
        } else {
            let high_close = (high[t] - close[t - 1]).abs();
            let low_close = (low[t] - close[t - 1]).abs();
            tr.push(range.max(high_close).max(low_close));
        }
    }
    rolling_mean(&tr, period)
}

/// On-Balance Volume: a single left-to-right pass carrying a running sum.
///
/// Starts at zero; adds volume on an up close, subtracts on a down close,
/// holds otherwise. A NaN close compares false both ways and holds.
pub fn obv(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(close.len());
    let mut acc = 0.0;
    for t in 0..close.len() {
        if t > 0 {
            if close[t] > close[t - 1] {
                acc += volume[t];
            } else if close[t] < close[t - 1] {
                acc -= volume[t];
            }
        }
        out.push(acc);
    }
    out
}

/// Volume-weighted average price, cumulative from the start of the series.
///
/// There is no intraday session reset; the accumulation runs over whatever
/// span the series covers. Zero cumulative volume yields NaN.
pub fn vwap(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let mut cum_vp = 0.0;
    let mut cum_v = 0.0;
    close
        .iter()
        .zip(volume)
        .map(|(&c, &v)| {
            cum_vp += c * v;
            cum_v += v;
            cum_vp / cum_v
        })
        .collect()
}

/// Price/OBV divergence: close breaks its prior `window`-bar high while OBV
/// fails to break its own. Both prior-high windows exclude the current row.
/// False wherever either rolling max is still undefined.
pub fn divergence(close: &[f64], obv: &[f64], window: usize) -> Vec<bool> {
    let prior_high = shift_one(rolling_max(close, window));
    let prior_obv_high = shift_one(rolling_max(obv, window));
    (0..close.len())
        .map(|t| close[t] > prior_high[t] && obv[t] < prior_obv_high[t])
        .collect()
}

// Shifts forward by one position, introducing NaN at index 0.
fn shift_one(values: Vec<f64>) -> Vec<f64> {
    let mut shifted = vec![f64::NAN; values.len()];
    if values.len() > 1 {
        shifted[1..].copy_from_slice(&values[..values.len() - 1]);
    }
    shifted
}
