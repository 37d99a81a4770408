/// Positional discount `1 / log2(rank + 1)` for a 1-indexed rank.
pub fn rank_discount(rank: usize) -> f64 {
    1.0 / ((rank + 1) as f64).log2()
}

/// `a * ln(a / b)` with the `0 * ln(0 / b) = 0` convention.
pub fn xlogy_ratio(a: f64, b: f64) -> f64 {
    if a <= 0.0 { 0.0 } else { a * (a / b).ln() }
}
