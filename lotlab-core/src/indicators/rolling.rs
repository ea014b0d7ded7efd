//! Rolling window extrema.

/// Rolling maximum over the trailing `period` values (inclusive of the
/// current one). NaN before a full window.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "rolling window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        result[i] = window.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_max_basic() {
        let v = [1.0, 3.0, 2.0, 5.0, 4.0];
        let r = rolling_max(&v, 3);
        assert!(r[0].is_nan());
        assert!(r[1].is_nan());
        assert_eq!(r[2], 3.0);
        assert_eq!(r[3], 5.0);
        assert_eq!(r[4], 5.0);
    }

    #[test]
    fn window_of_one_is_identity() {
        let v = [2.0, 1.0, 3.0];
        assert_eq!(rolling_max(&v, 1), vec![2.0, 1.0, 3.0]);
    }
}
