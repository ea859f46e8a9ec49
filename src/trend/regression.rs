use super::{TrendEstimator, TrendForecast};
use crate::history::Candle;

/// Regresses the next day's price on the rolling mean of the current day.
///
/// Open and close are fitted separately. Confidence is
/// `1 - (σ(open % moves) + σ(close % moves)) / 2` over the last `window`
/// usable days, clamped to `[0, 1]` (σ = sample standard deviation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverageRegression {
    pub window: usize,
}

impl Default for MovingAverageRegression {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl MovingAverageRegression {
    pub const fn new(window: usize) -> Self {
        Self { window }
    }
}

impl TrendEstimator for MovingAverageRegression {
    fn forecast(&self, symbol: &str, candles: &[Candle]) -> Option<TrendForecast> {
        let window = self.window.max(1);
        if candles.len() < window + 1 {
            tracing::debug!(symbol, candles = candles.len(), window, "history too short");
            return None;
        }

        let opens: Vec<f64> = candles.iter().map(|c| c.open).collect();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let open = Series::build(&opens, window);
        let close = Series::build(&closes, window);

        // Both series drop the same leading rows, so they have equal length.
        if open.len() < 2 {
            tracing::debug!(symbol, "fewer than two usable samples");
            return None;
        }

        let predicted_open = open.predict_next()?;
        let predicted_close = close.predict_next()?;

        let spread = (sample_std(open.recent_changes(window)) + sample_std(close.recent_changes(window))) / 2.0;
        let confidence = if spread.is_finite() {
            (1.0 - spread).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Some(TrendForecast {
            symbol: symbol.to_string(),
            predicted_open,
            predicted_close,
            predicted_average: (predicted_open + predicted_close) / 2.0,
            confidence,
        })
    }
}

/// Rows where both the rolling mean and the day-over-day change are defined.
struct Series {
    price: Vec<f64>,
    mean: Vec<f64>,
    change: Vec<f64>,
}

impl Series {
    fn build(prices: &[f64], window: usize) -> Self {
        // First row with a full window; also has a previous day for the change.
        let start = (window - 1).max(1);
        let mut s = Self {
            price: Vec::new(),
            mean: Vec::new(),
            change: Vec::new(),
        };
        for i in start..prices.len() {
            let w = &prices[i + 1 - window..=i];
            s.price.push(prices[i]);
            s.mean.push(w.iter().sum::<f64>() / window as f64);
            s.change.push((prices[i] - prices[i - 1]) / prices[i - 1]);
        }
        s
    }

    fn len(&self) -> usize {
        self.price.len()
    }

    /// Fits `price[k+1] ~ mean[k]` and evaluates it at the last mean.
    fn predict_next(&self) -> Option<f64> {
        let n = self.len();
        let (slope, intercept) = ols(&self.mean[..n - 1], &self.price[1..])?;
        let next = intercept + slope * self.mean[n - 1];
        next.is_finite().then_some(next)
    }

    fn recent_changes(&self, k: usize) -> &[f64] {
        &self.change[self.change.len().saturating_sub(k)..]
    }
}

/// Least squares line through `(x, y)`. Constant `x` gives a flat line at `mean(y)`.
fn ols(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let sxx: f64 = x.iter().map(|v| (v - mx).powi(2)).sum();
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let slope = if sxx.abs() < f64::EPSILON { 0.0 } else { sxy / sxx };
    Some((slope, my - slope * mx))
}

fn sample_std(v: &[f64]) -> f64 {
    if v.len() < 2 {
        return 0.0;
    }
    let n = v.len() as f64;
    let m = v.iter().sum::<f64>() / n;
    (v.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}
