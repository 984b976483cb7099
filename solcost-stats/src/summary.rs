//! Summary Statistics
//!
//! Mean and population standard deviation over the valid samples of one
//! field. An empty sample set produces no summary at all, so undefined
//! fields surface as undefined, never as zero.

/// Summary statistics for one estimation field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    /// Arithmetic mean over valid samples
    pub mean: f64,
    /// Population standard deviation (denominator N)
    pub std_dev: f64,
}

/// Compute summary statistics over valid samples.
///
/// Returns `None` for an empty sample set; the caller reports the field as
/// undefined rather than fabricating a zero.
pub fn compute_summary(samples: &[f64]) -> Option<FieldSummary> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    Some(FieldSummary {
        mean,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_samples_have_zero_deviation() {
        let summary = compute_summary(&[2500.0; 10]).unwrap();
        assert!((summary.mean - 2500.0).abs() < f64::EPSILON);
        assert!((summary.std_dev - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_samples_reduce_to_midpoint_and_half_gap() {
        // mean = (a+b)/2, population std dev = |a-b|/2
        let summary = compute_summary(&[10.0, 20.0]).unwrap();
        assert!((summary.mean - 15.0).abs() < 1e-12);
        assert!((summary.std_dev - 5.0).abs() < 1e-12);
    }

    #[test]
    fn population_not_sample_deviation() {
        // population std dev of [1, 2, 3, 4] is sqrt(1.25), not the
        // sample estimate sqrt(5/3)
        let summary = compute_summary(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((summary.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_sample_is_its_own_mean() {
        let summary = compute_summary(&[0.01]).unwrap();
        assert!((summary.mean - 0.01).abs() < f64::EPSILON);
        assert!((summary.std_dev - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_samples_yield_no_summary() {
        assert_eq!(compute_summary(&[]), None);
    }
}
