use rayon::prelude::*;
use super::{GraphOptions, GraphPoint};
use termcalc_compute::Expression;

/// Evaluates the expression at each sampled x-value and returns the points to draw.
///
/// Every sample evaluates its own unevaluated copy of the expression with `x` bound, so samples
/// are independent and are computed in parallel. Samples that fail to evaluate, do not produce a
/// single number, or produce a non-finite number are skipped.
pub(crate) fn evaluate_expr(
    expr: &Expression,
    options: &GraphOptions,
) -> Vec<(usize, GraphPoint<f64>)> {
    (0..options.sample_count())
        .into_par_iter()
        .filter_map(|sample| {
            let x = options.sample_x(sample);
            let mut copy = expr.unevaluated();
            copy.bind_constant("x", x);
            copy.evaluate_with(&options.eval)
                .numeric_value()
                .ok()
                .filter(|y| y.is_finite())
                .map(|y| (sample, GraphPoint(x, y)))
        })
        .collect()
}
