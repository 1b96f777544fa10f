//! Trailing-window volatility, trend slopes, and trend classification.

use chrono::{DateTime, Utc};
use manas_models::constants::SLOPE_STABLE_EPS;
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Sample standard deviation of the last `window` values ending at
/// `index` (inclusive). `None` with fewer than 2 values in the window.
pub fn rolling_volatility(series: &[f64], index: usize, window: usize) -> Option<f64> {
    if index >= series.len() {
        return None;
    }
    let start = (index + 1).saturating_sub(window);
    let slice = &series[start..=index];
    let n = slice.len();
    if n < 2 {
        return None;
    }

    let mean = slice.iter().sum::<f64>() / n as f64;
    let ss: f64 = slice.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Ordinary least-squares slope of value against time, in value-units
/// per day, over the trailing `window_days` ending at `points[index]`.
///
/// `None` with fewer than 2 points in the window, or when every point in
/// the window shares one timestamp (no time axis to regress on).
pub fn slope(points: &[(DateTime<Utc>, f64)], index: usize, window_days: f64) -> Option<f64> {
    if index >= points.len() {
        return None;
    }
    let end = points[index].0;
    let cutoff_ms = (window_days * SECONDS_PER_DAY * 1000.0) as i64;
    let in_window: Vec<(f64, f64)> = points[..=index]
        .iter()
        .filter(|(ts, _)| (end - *ts).num_milliseconds() <= cutoff_ms)
        .map(|(ts, v)| (ts.timestamp_millis() as f64 / (SECONDS_PER_DAY * 1000.0), *v))
        .collect();
    if in_window.len() < 2 {
        return None;
    }

    let n = in_window.len() as f64;
    let x_mean = in_window.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = in_window.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx: f64 = in_window
        .iter()
        .map(|(x, _)| (x - x_mean) * (x - x_mean))
        .sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = in_window
        .iter()
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();
    Some(sxy / sxx)
}

/// Classification of the 7-day composite trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTrend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl SentimentTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

/// Classify a 7-day slope: within [`SLOPE_STABLE_EPS`] of flat is stable,
/// and an uncomputable slope is insufficient data, not an error.
pub fn classify_trend(slope_per_day: Option<f64>) -> SentimentTrend {
    match slope_per_day {
        None => SentimentTrend::InsufficientData,
        Some(s) if s.abs() <= SLOPE_STABLE_EPS => SentimentTrend::Stable,
        Some(s) if s > 0.0 => SentimentTrend::Improving,
        Some(_) => SentimentTrend::Declining,
    }
}
