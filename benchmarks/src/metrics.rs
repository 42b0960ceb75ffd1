/// Metrics for evaluating classifiers.
pub struct Metrics;

impl Metrics {
    /// Fraction of positions where `y_pred` equals `y_true`.
    ///
    /// # Panics
    ///
    /// If the slices differ in length.
    pub fn accuracy<T: AsRef<str>, P: AsRef<str>>(y_true: &[T], y_pred: &[P]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let hits = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t.as_ref() == p.as_ref())
            .count();

        hits as f64 / y_true.len() as f64
    }

    /// Accuracy restricted to `rows`, e.g. the pseudo-labeled ones.
    pub fn accuracy_on<T: AsRef<str>, P: AsRef<str>>(y_true: &[T], y_pred: &[P], rows: &[usize]) -> f64 {
        let truth: Vec<&str> = rows.iter().map(|&i| y_true[i].as_ref()).collect();
        let predicted: Vec<&str> = rows.iter().map(|&i| y_pred[i].as_ref()).collect();
        Self::accuracy(&truth, &predicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(Metrics::accuracy(&["a", "b", "a", "b"], &["a", "b", "b", "b"]), 0.75);
        assert_eq!(Metrics::accuracy::<&str, &str>(&[], &[]), 0.0);
    }

    #[test]
    fn test_accuracy_on_rows() {
        let truth = ["a", "b", "a"];
        let predicted = ["a", "a", "a"];
        assert_eq!(Metrics::accuracy_on(&truth, &predicted, &[0, 2]), 1.0);
        assert_eq!(Metrics::accuracy_on(&truth, &predicted, &[1]), 0.0);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_accuracy_length_mismatch() {
        Metrics::accuracy(&["a"], &["a", "b"]);
    }
}
