//! Console graphing.
//!
//! To plot expressions, create a [`Graph`], add expressions in terms of `x` to it, then call
//! [`Graph::draw()`] to rasterize them onto a [`Canvas`] of characters. Every cell of the canvas
//! that contains at least one sampled point is drawn as `X`.
//!
//! # Example
//!
//! ```
//! use termcalc_graph::{graph::GraphOptions, Graph};
//!
//! let options = GraphOptions::default()
//!     .x_range(-2.0, 2.0)
//!     .y_range(-2.0, 2.0)
//!     .canvas_size(4, 4);
//! let canvas = Graph::with_opts(options)
//!     .try_add_expr("1").unwrap()
//!     .draw();
//!
//! assert_eq!(canvas.to_string(), "    \nXXXX\n    \n    ");
//! ```

mod eval;
pub mod opts;
pub mod point;

use eval::evaluate_expr;
use rayon::prelude::*;
use std::fmt::{self, Display, Formatter};
use termcalc_compute::Expression;
use termcalc_error::Error;
use tracing::debug;

pub use opts::GraphOptions;
pub use point::{CanvasPoint, GraphPoint};

/// The character drawn for an occupied cell.
pub const MARK: char = 'X';

/// A grid of character cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// The cells of the canvas, row by row, with row `0` at the top.
    pub cells: Vec<Vec<bool>>,
}

impl Canvas {
    /// Creates an empty canvas with the given size.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            cells: vec![vec![false; width]; height],
        }
    }

    /// Marks the cell at the given point. Points outside of the canvas are ignored.
    pub fn mark(&mut self, point: CanvasPoint<usize>) {
        if let Some(cell) = self.cells.get_mut(point.1).and_then(|row| row.get_mut(point.0)) {
            *cell = true;
        }
    }

    /// Returns true if the cell at the given point is marked.
    pub fn is_marked(&self, point: CanvasPoint<usize>) -> bool {
        self.cells
            .get(point.1)
            .and_then(|row| row.get(point.0))
            .copied()
            .unwrap_or(false)
    }
}

impl Display for Canvas {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", if cell { MARK } else { ' ' })?;
            }
        }
        Ok(())
    }
}

/// A graph containing expressions to plot.
///
/// See the [module-level documentation](self) for more information.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The expressions to plot.
    pub expressions: Vec<Expression>,

    /// The plotting options for the graph.
    pub options: GraphOptions,
}

impl Graph {
    /// Create a new, empty graph.
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Create a new graph with the given options.
    pub fn with_opts(options: GraphOptions) -> Graph {
        Graph {
            options,
            ..Graph::default()
        }
    }

    /// Add an expression to the graph.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn add_expr(&mut self, expr: Expression) -> &mut Self {
        self.expressions.push(expr);
        self
    }

    /// Tries to parse the given expression and add it to the graph.
    ///
    /// Returns a mutable reference to the graph to allow chaining.
    pub fn try_add_expr(&mut self, expr: &str) -> Result<&mut Self, Error> {
        self.expressions.push(termcalc_compute::parse(expr)?);
        Ok(self)
    }

    /// Samples every expression and rasterizes the points onto a canvas.
    ///
    /// If the options describe an empty viewport, the canvas is left blank.
    pub fn draw(&self) -> Canvas {
        let options = &self.options;
        let mut canvas = Canvas::new(options.canvas_size.0, options.canvas_size.1);
        if !options.is_valid() {
            return canvas;
        }

        let expr_points = self.expressions
            .par_iter()
            .map(|expr| evaluate_expr(expr, options))
            .collect::<Vec<_>>();

        for points in expr_points {
            debug!(points = points.len(), "sampled expression");
            for (sample, point) in points {
                if let Some(row) = options.y_to_row(point.1) {
                    canvas.mark(CanvasPoint(sample / options.samples_per_column, row));
                }
            }
        }

        canvas
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn small() -> GraphOptions {
        GraphOptions::default()
            .x_range(-2.0, 2.0)
            .y_range(-2.0, 2.0)
            .canvas_size(4, 4)
            .samples_per_column(1)
    }

    #[test]
    fn diagonal() {
        let canvas = Graph::with_opts(small()).try_add_expr("x").unwrap().draw();
        assert_eq!(canvas.to_string(), "   X\n  X \n X  \nX   ");
    }

    #[test]
    fn out_of_range_is_skipped() {
        let canvas = Graph::with_opts(small()).try_add_expr("x^2+5").unwrap().draw();
        assert_eq!(canvas, Canvas::new(4, 4));
    }

    #[test]
    fn several_expressions() {
        let canvas = Graph::with_opts(small())
            .try_add_expr("1.5").unwrap()
            .try_add_expr("0-1.5").unwrap()
            .draw();
        assert_eq!(canvas.to_string(), "XXXX\n    \n    \nXXXX");
    }

    #[test]
    fn invalid_viewport() {
        let canvas = Graph::with_opts(small().x_range(1.0, -1.0)).try_add_expr("x").unwrap().draw();
        assert!(!canvas.is_marked(CanvasPoint(0, 0)));
        assert_eq!(canvas.cells.len(), 4);
    }
}
