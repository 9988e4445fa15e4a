//! Small numeric helpers shared by the dashboard and the leaderboard.

/// Min-max scaling into `[0, 1]`.
///
/// NaN entries are ignored when finding the range. When every value is equal
/// (or none is a number) the column carries no information and every entry
/// becomes `0.5`. Infinite entries follow IEEE arithmetic and may come out as
/// NaN; callers decide what that means.
pub fn safe_normalize(values: &[f64]) -> Vec<f64> {
    let mut min = f64::NAN;
    let mut max = f64::NAN;
    for &v in values.iter().filter(|v| !v.is_nan()) {
        min = if min.is_nan() { v } else { min.min(v) };
        max = if max.is_nan() { v } else { max.max(v) };
    }
    if min.is_nan() || min == max {
        return vec![0.5; values.len()];
    }
    values.iter().map(|&v| (v - min) / (max - min)).collect()
}

/// Least-squares slope of `values` against their position.
///
/// NaN points are dropped but keep their position. Returns 0 for fewer than
/// two points.
pub fn slope(values: &[f64]) -> f64 {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, &v)| (i as f64, v))
        .collect();
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for &(x, y) in &points {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    if sxx == 0.0 { 0.0 } else { sxy / sxx }
}

/// Trailing mean over at most `window` values; the first entries average
/// whatever is available.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let len = (i + 1).min(window);
        out.push(sum / len as f64);
    }
    out
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Quantile of already sorted values with linear interpolation.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - 1.5 * iqr;
        let hi_fence = q3 + 1.5 * iqr;
        let inside = sorted.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
        let (whisker_low, whisker_high) = inside
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(lo_fence..=hi_fence).contains(v))
            .collect();
        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Counts of `values` in `bins` equal-width bins spanning `[0, max]`.
/// Values above `max` land in the last bin.
pub fn histogram(values: &[f64], max: f64, bins: usize) -> Vec<u32> {
    let bins = bins.max(1);
    let mut counts = vec![0u32; bins];
    for &v in values.iter().filter(|v| v.is_finite()) {
        let idx = if max > 0.0 {
            ((v.max(0.0) / max) * bins as f64).floor() as usize
        } else {
            0
        };
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}
