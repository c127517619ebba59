/// Round to two decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Mean over contributing values; an empty partition averages to 0.0
pub fn mean_or_zero(sum: f64, count: usize) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// True when `value` carries no digits beyond the second decimal
pub fn has_two_decimals(value: f64) -> bool {
    value.is_finite() && (round2(value) - value).abs() < 1e-9
}
