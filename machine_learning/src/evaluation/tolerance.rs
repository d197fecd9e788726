use ndarray::ArrayView1;

use crate::{MlErr, Result};

/// The acceptable deviation between two computations of the same value.
///
/// Two values `a` and `b` match when `|a - b| <= max(absolute, relative * max(|a|, |b|))`. The
/// absolute floor only matters for values at or near zero, where a relative bound collapses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    relative: f64,
    absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1e-6,
            absolute: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    pub fn relative(&self) -> f64 {
        self.relative
    }

    pub fn absolute(&self) -> f64 {
        self.absolute
    }

    /// Whether `a` and `b` are equal within this tolerance. `NaN` never matches and an
    /// infinity only matches the same infinity.
    pub fn matches(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }

        let diff = (a - b).abs();
        let bound = self.absolute.max(self.relative * a.abs().max(b.abs()));
        diff.is_finite() && diff <= bound
    }

    /// Compares a computed vector against a reference one element by element.
    ///
    /// # Arguments
    /// * `computed` - The values this crate computed.
    /// * `reference` - The values to check them against.
    ///
    /// # Returns
    /// A summary of the comparison or a `DimensionMismatch` if the lengths differ.
    pub fn compare(
        &self,
        computed: ArrayView1<f64>,
        reference: ArrayView1<f64>,
    ) -> Result<Comparison> {
        if computed.len() != reference.len() {
            return Err(MlErr::mismatch(
                "reference",
                reference.len(),
                computed.len(),
            ));
        }

        let mut cmp = Comparison {
            passed: true,
            ..Default::default()
        };

        for (i, (&a, &b)) in computed.iter().zip(reference).enumerate() {
            let abs_diff = (a - b).abs();
            let scale = a.abs().max(b.abs());
            let rel_diff = if scale > 0. { abs_diff / scale } else { abs_diff };

            // NaN diffs must still surface as the worst element.
            if abs_diff.is_nan() || abs_diff > cmp.max_abs_diff {
                cmp.max_abs_diff = abs_diff;
                cmp.worst_index = Some(i);
            }
            if rel_diff.is_nan() || rel_diff > cmp.max_rel_diff {
                cmp.max_rel_diff = rel_diff;
            }

            cmp.passed &= self.matches(a, b);
        }

        Ok(cmp)
    }
}

/// The outcome of comparing two vectors with a `Tolerance`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Comparison {
    pub max_abs_diff: f64,
    pub max_rel_diff: f64,
    /// The element with the largest absolute difference, `None` if all of them are equal.
    pub worst_index: Option<usize>,
    pub passed: bool,
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn relative_bound_scales_with_magnitude() {
        let tol = Tolerance::default();
        assert!(tol.matches(1e6, 1e6 + 0.5));
        assert!(!tol.matches(1., 1. + 1e-5));
    }

    #[test]
    fn absolute_floor_applies_near_zero() {
        let tol = Tolerance::default();
        assert!(tol.matches(0., 1e-13));
        assert!(!tol.matches(0., 1e-9));
    }

    #[test]
    fn nan_never_matches() {
        let tol = Tolerance::new(1., 1.);
        assert!(!tol.matches(f64::NAN, f64::NAN));
        assert!(!tol.matches(0., f64::NAN));
    }

    #[test]
    fn infinities_only_match_themselves() {
        let tol = Tolerance::default();
        assert!(!tol.matches(f64::INFINITY, 1.));
        assert!(!tol.matches(1., f64::NEG_INFINITY));
        assert!(!tol.matches(f64::INFINITY, f64::NEG_INFINITY));
        assert!(tol.matches(f64::INFINITY, f64::INFINITY));
    }

    #[test]
    fn compare_fails_on_overflowed_outputs() {
        let cmp = Tolerance::default()
            .compare(array![f64::INFINITY].view(), array![1.].view())
            .unwrap();

        assert!(!cmp.passed);
        assert_eq!(cmp.worst_index, Some(0));
        assert_eq!(cmp.max_abs_diff, f64::INFINITY);
    }

    #[test]
    fn compare_reports_the_worst_element() {
        let tol = Tolerance::default();
        let cmp = tol
            .compare(array![1., 2., 3.].view(), array![1., 2.5, 3.].view())
            .unwrap();

        assert!(!cmp.passed);
        assert_eq!(cmp.worst_index, Some(1));
        assert_eq!(cmp.max_abs_diff, 0.5);
        assert_eq!(cmp.max_rel_diff, 0.2);
    }

    #[test]
    fn compare_passes_identical_vectors() {
        let cmp = Tolerance::default()
            .compare(array![0.5, -2.].view(), array![0.5, -2.].view())
            .unwrap();

        assert!(cmp.passed);
        assert_eq!(cmp.worst_index, None);
        assert_eq!(cmp.max_abs_diff, 0.);
    }

    #[test]
    fn compare_rejects_different_lengths() {
        let err = Tolerance::default()
            .compare(array![1., 2.].view(), array![1.].view())
            .unwrap_err();

        assert_eq!(err, MlErr::mismatch("reference", 1, 2));
    }
}
