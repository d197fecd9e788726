use exchange::specs::{NetworkSpec, VerifySpec};
use log::{info, warn};
use ndarray::{s, Array1, Array2, ArrayView2};

use machine_learning::{Comparison, ForwardEvaluator, Network, NetworkBuilder, Tolerance};

use crate::{config, error::Result, table::Table};

/// The evaluation of a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    pub index: usize,
    pub output: Array1<f64>,
    /// The comparison against the library's prediction, if the table carried one.
    pub comparison: Option<Comparison>,
}

/// The outcome of a verification run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows: Vec<RowResult>,
    pub max_abs_diff: f64,
    pub max_rel_diff: f64,
    pub failed: usize,
}

impl Report {
    /// Whether every compared row agreed with its reference.
    pub fn passed(&self) -> bool {
        self.failed == 0
    }

    /// Whether any row was compared at all.
    pub fn compared(&self) -> bool {
        self.rows.iter().any(|row| row.comparison.is_some())
    }
}

/// Runs a verification as configured: loads the network and the samples, evaluates every
/// sample and compares it with the reference columns, if any.
pub fn verify(spec: &VerifySpec) -> Result<Report> {
    let network_spec: NetworkSpec = exchange::from_path(&spec.model)?;
    let network = NetworkBuilder::new().build(&network_spec)?;
    info!(
        "loaded network from '{}' with dims {:?}",
        spec.model.display(),
        network.dims()
    );

    let table = Table::load(&spec.dataset.path, spec.dataset.header)?;
    let (x, y) = table.split(spec.dataset.x_size, spec.dataset.y_size)?;
    let n = spec.limit.map_or(x.nrows(), |limit| limit.min(x.nrows()));
    info!(
        "evaluating {n} of {} rows from '{}'",
        x.nrows(),
        spec.dataset.path.display()
    );

    let x = x.slice(s![..n, ..]);
    let y = y.slice(s![..n, ..]);
    let reference = (y.ncols() > 0).then_some(y);

    verify_with(
        &network,
        x,
        reference,
        config::tolerance(spec),
        spec.parallel,
    )
}

/// Evaluates every row of `x` and compares it with the matching row of `reference`.
///
/// # Arguments
/// * `network` - The trained network.
/// * `x` - The samples, one per row.
/// * `reference` - The expected outputs for the same samples, one per row.
/// * `tolerance` - How far a computed output may drift from its reference.
/// * `parallel` - Whether to evaluate the rows in parallel.
///
/// # Returns
/// The report, or the first dimension error found.
pub fn verify_with(
    network: &Network,
    x: ArrayView2<f64>,
    reference: Option<ArrayView2<f64>>,
    tolerance: Tolerance,
    parallel: bool,
) -> Result<Report> {
    let evaluator = ForwardEvaluator::new();
    let outputs: Array2<f64> = if parallel {
        evaluator.par_evaluate_batch(network, x)?
    } else {
        evaluator.evaluate_batch(network, x)?
    };

    let mut report = Report {
        rows: Vec::with_capacity(outputs.nrows()),
        max_abs_diff: 0.,
        max_rel_diff: 0.,
        failed: 0,
    };

    for (index, output) in outputs.rows().into_iter().enumerate() {
        let comparison = match reference {
            Some(y) => Some(tolerance.compare(output, y.row(index))?),
            None => None,
        };

        if let Some(cmp) = &comparison {
            report.max_abs_diff = worst(report.max_abs_diff, cmp.max_abs_diff);
            report.max_rel_diff = worst(report.max_rel_diff, cmp.max_rel_diff);

            if !cmp.passed {
                report.failed += 1;
                warn!(
                    "row {index}: computed {output} but the reference is {}, off by {:e}",
                    y_row(reference, index),
                    cmp.max_abs_diff
                );
            }
        }

        report.rows.push(RowResult {
            index,
            output: output.to_owned(),
            comparison,
        });
    }

    info!(
        "{} rows evaluated, {} failed, max abs diff {:e}, max rel diff {:e}",
        report.rows.len(),
        report.failed,
        report.max_abs_diff,
        report.max_rel_diff
    );
    Ok(report)
}

/// Like `f64::max`, but a `NaN` on either side wins.
fn worst(acc: f64, diff: f64) -> f64 {
    if acc.is_nan() || diff.is_nan() {
        f64::NAN
    } else {
        acc.max(diff)
    }
}

fn y_row(reference: Option<ArrayView2<f64>>, index: usize) -> Array1<f64> {
    reference.map_or_else(|| Array1::zeros(0), |y| y.row(index).to_owned())
}

#[cfg(test)]
mod tests {
    use machine_learning::arch::{
        activations::ActFn,
        layers::{Dense, WeightLayout},
    };
    use ndarray::array;

    use super::*;

    fn network() -> Network {
        let l1 = Dense::new(
            array![[1., 0.], [0., 1.]],
            array![0., 0.],
            ActFn::relu(),
            WeightLayout::InputMajor,
        )
        .unwrap();
        let l2 = Dense::new(
            array![[1.], [1.]],
            array![0.],
            ActFn::identity(),
            WeightLayout::InputMajor,
        )
        .unwrap();

        Network::new([l1, l2]).unwrap()
    }

    #[test]
    fn matching_references_pass() {
        let x = array![[3., -2.], [1., 1.]];
        let y = array![[3.], [2.]];

        let report =
            verify_with(&network(), x.view(), Some(y.view()), Tolerance::default(), false)
                .unwrap();

        assert!(report.passed());
        assert!(report.compared());
        assert_eq!(report.rows[0].output, array![3.]);
        assert_eq!(report.rows[1].output, array![2.]);
    }

    #[test]
    fn diverging_references_are_counted() {
        let x = array![[3., -2.], [1., 1.], [0., 0.]];
        let y = array![[3.], [2.5], [0.]];

        let report =
            verify_with(&network(), x.view(), Some(y.view()), Tolerance::default(), true)
                .unwrap();

        assert!(!report.passed());
        assert_eq!(report.failed, 1);
        assert_eq!(report.max_abs_diff, 0.5);
    }

    #[test]
    fn without_references_nothing_is_compared() {
        let x = array![[3., -2.]];
        let report = verify_with(&network(), x.view(), None, Tolerance::default(), false).unwrap();

        assert!(report.passed());
        assert!(!report.compared());
        assert!(report.rows[0].comparison.is_none());
    }

    #[test]
    fn overflowed_outputs_fail_and_surface_in_the_summary() {
        let layer = Dense::new(
            array![[1e308]],
            array![0.],
            ActFn::identity(),
            WeightLayout::InputMajor,
        )
        .unwrap();
        let network = Network::new([layer]).unwrap();
        let x = array![[10.], [0.]];
        let y = array![[1.], [0.]];

        let report =
            verify_with(&network, x.view(), Some(y.view()), Tolerance::default(), false)
                .unwrap();

        assert_eq!(report.rows[0].output, array![f64::INFINITY]);
        assert_eq!(report.failed, 1);
        assert!(!report.passed());
        assert_eq!(report.max_abs_diff, f64::INFINITY);
        assert!(report.max_rel_diff.is_nan());
    }

    #[test]
    fn reference_width_must_match_the_output() {
        let x = array![[3., -2.]];
        let y = array![[3., 0.]];
        let res = verify_with(&network(), x.view(), Some(y.view()), Tolerance::default(), false);
        assert!(res.is_err());
    }
}
