use super::point::{CanvasPoint, GraphPoint};
use termcalc_compute::EvalOptions;

/// Options to use when plotting a graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphOptions {
    /// The `(min, max)` range of x-values to plot.
    ///
    /// The default value is `(-10.0, 10.0)`.
    pub x_range: GraphPoint<f64>,

    /// The `(min, max)` range of y-values that are visible. Samples outside of this range are not
    /// drawn.
    ///
    /// The default value is `(-10.0, 10.0)`.
    pub y_range: GraphPoint<f64>,

    /// The width and height of the canvas, in characters.
    ///
    /// The default value is `(80, 24)`.
    pub canvas_size: CanvasPoint<usize>,

    /// The number of x-values to sample in each column of the canvas.
    ///
    /// The default value is `4`.
    pub samples_per_column: usize,

    /// The options used to evaluate each sample.
    pub eval: EvalOptions,
}

/// The default options for a graph. Returns a [`GraphOptions`] with the following values:
///
/// - [`x_range`](GraphOptions::x_range): `(-10.0, 10.0)`
/// - [`y_range`](GraphOptions::y_range): `(-10.0, 10.0)`
/// - [`canvas_size`](GraphOptions::canvas_size): `(80, 24)`
/// - [`samples_per_column`](GraphOptions::samples_per_column): `4`
impl Default for GraphOptions {
    fn default() -> GraphOptions {
        GraphOptions {
            x_range: GraphPoint(-10.0, 10.0),
            y_range: GraphPoint(-10.0, 10.0),
            canvas_size: CanvasPoint(80, 24),
            samples_per_column: 4,
            eval: EvalOptions::default(),
        }
    }
}

impl GraphOptions {
    /// Set the range of x-values. Returns an updated [`GraphOptions`] for chaining.
    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = GraphPoint(min, max);
        self
    }

    /// Set the range of y-values. Returns an updated [`GraphOptions`] for chaining.
    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = GraphPoint(min, max);
        self
    }

    /// Set the canvas size. Returns an updated [`GraphOptions`] for chaining.
    pub fn canvas_size(mut self, width: usize, height: usize) -> Self {
        self.canvas_size = CanvasPoint(width, height);
        self
    }

    /// Set the number of samples per column. Returns an updated [`GraphOptions`] for chaining.
    pub fn samples_per_column(mut self, samples_per_column: usize) -> Self {
        self.samples_per_column = samples_per_column;
        self
    }

    /// Set the evaluation options. Returns an updated [`GraphOptions`] for chaining.
    pub fn eval(mut self, eval: EvalOptions) -> Self {
        self.eval = eval;
        self
    }

    /// Returns the total number of x-values to sample.
    pub(crate) fn sample_count(&self) -> usize {
        self.canvas_size.0 * self.samples_per_column
    }

    /// Returns the x-value of the given sample. Samples are spaced evenly, each one at the center
    /// of its slice of the x-range.
    pub(crate) fn sample_x(&self, sample: usize) -> f64 {
        let step = (self.x_range.1 - self.x_range.0) / self.sample_count() as f64;
        self.x_range.0 + (sample as f64 + 0.5) * step
    }

    /// Converts a y-value in **graph** space to a row in **canvas** space, where row `0` is the
    /// top of the canvas. Returns [`None`] if the value is not visible.
    pub(crate) fn y_to_row(&self, y: f64) -> Option<usize> {
        let GraphPoint(min, max) = self.y_range;
        if !y.is_finite() || y < min || y > max || self.canvas_size.1 == 0 {
            return None;
        }

        // normalize to [0.0, 1.0], where 0.0 is the top edge of the canvas
        let normalized = (max - y) / (max - min);
        let row = (normalized * self.canvas_size.1 as f64).floor() as usize;
        Some(row.min(self.canvas_size.1 - 1))
    }

    /// Returns true if the options describe a non-empty viewport.
    pub fn is_valid(&self) -> bool {
        self.x_range.0 < self.x_range.1
            && self.y_range.0 < self.y_range.1
            && self.canvas_size.0 > 0
            && self.canvas_size.1 > 0
            && self.samples_per_column > 0
    }
}
