/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; NaN for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let center = mean(values);
    values
        .iter()
        .map(|value| {
            let deviation = value - center;
            deviation * deviation
        })
        .sum::<f64>()
        / values.len() as f64
}

/// Population variance of the non-NaN values; NaN when none remain.
pub fn nan_variance(values: impl Iterator<Item = f64>) -> f64 {
    let kept: Vec<f64> = values.filter(|value| !value.is_nan()).collect();
    population_variance(&kept)
}
