//! Sampling an expression in `x` for graphing.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::engine::compile;
use crate::error::{ExprError, Result};
use crate::eval::evaluate;
use crate::functions::round_to;

/// Number of samples hosts request when they have no preference.
pub const DEFAULT_PLOT_POINTS: usize = 1000;

/// Sample `x` values are rounded to this many decimals.
const X_DECIMALS: i32 = 6;

/// Closed-open interval of `x` values to sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRange {
    pub x_min: f64,
    pub x_max: f64,
}

impl PlotRange {
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self { x_min, x_max }
    }

    fn is_valid(&self) -> bool {
        self.x_min.is_finite() && self.x_max.is_finite() && self.x_min < self.x_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Evaluate `expression` at `points` evenly spaced `x` values.
///
/// Sampling starts at `range.x_min` and steps by `(x_max - x_min) / points`, so
/// `x_max` itself is not sampled. Points where evaluation fails (a domain error,
/// division by zero) or yields a non-finite value are left out, which leaves a gap
/// in the drawn graph.
///
/// # Errors
///
/// - `InvalidPlotRange` when the range is empty, reversed or not finite, or
///   `points < 2`
/// - any lexing or conversion error of `expression`
pub fn sample(expression: &str, range: PlotRange, points: usize) -> Result<Vec<PlotPoint>> {
    if !range.is_valid() || points < 2 {
        return Err(ExprError::InvalidPlotRange);
    }
    let postfix = compile(expression)?;
    let step = (range.x_max - range.x_min) / points as f64;

    let samples: Vec<PlotPoint> = (0..points)
        .filter_map(|i| {
            let x = round_to(range.x_min + step * i as f64, X_DECIMALS);
            match evaluate(&postfix, x) {
                Ok(y) if y.is_finite() => Some(PlotPoint { x, y }),
                _ => None,
            }
        })
        .collect();

    log::debug!(
        "sampled {:?} over [{}, {}): {} of {} points kept",
        expression,
        range.x_min,
        range.x_max,
        samples.len(),
        points
    );
    Ok(samples)
}
