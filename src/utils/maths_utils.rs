#[inline]
pub fn mean_and_stddev(data: &[f64]) -> (f64, f64) {
    let count = data.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    let sum: f64 = data.iter().sum();
    let mean = sum / count as f64;

    let variance: f64 = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    (mean, variance.sqrt())
}

/// Rounds for display without turning -0.0 into "-0".
pub fn round_to(val: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (val * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_stddev() {
        assert_eq!(mean_and_stddev(&[]), (0.0, 0.0));
        let (mean, sd) = mean_and_stddev(&[3.0, 2.0]);
        assert!((mean - 2.5).abs() < 1e-12);
        assert!((sd - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.08000000001, 3), 0.08);
        assert_eq!(round_to(-0.0001, 2).to_string(), "0");
    }
}
