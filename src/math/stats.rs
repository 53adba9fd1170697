//! Column statistics over visit values.
//!
//! Missing cells are `None` and never take part in a statistic.

/// Mean of the observed values, `None` when nothing is observed.
pub fn observed_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.into_iter().flatten() {
        sum += v;
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    observed_mean(values.into_iter().map(Some)).unwrap_or(0.0)
}

/// Standard deviation with `n` in the denominator.
pub fn population_std<I>(values: I, mean_val: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut acc = 0.0;
    let mut n = 0usize;
    for v in values {
        let d = v - mean_val;
        acc += d * d;
        n += 1;
    }
    if n == 0 { 0.0 } else { (acc / n as f64).sqrt() }
}
