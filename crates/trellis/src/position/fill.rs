use log::{debug, warn};

use super::{
    PositionAdjustment, StackRow, collide, has_offset_ymin, missing_aesthetics, stack::stack_rows,
};
use crate::error::PositionError;

/// Stacks rows sharing an x interval and rescales every stack to `0..1`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionFill {
    width: Option<f64>,
}

impl PositionFill {
    /// Creates a fill adjustment; `width` sizes intervals derived from `x`.
    pub fn new(width: Option<f64>) -> Self {
        Self { width }
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }
}

impl PositionAdjustment for PositionFill {
    fn compute(&self, rows: Vec<StackRow>) -> Result<Vec<StackRow>, PositionError> {
        if rows.is_empty() {
            return Ok(rows);
        }

        let missing = missing_aesthetics(&rows, &["x", "ymax"]);
        if !missing.is_empty() {
            return Err(PositionError::MissingAesthetic {
                position: "position_fill",
                missing,
            });
        }

        if has_offset_ymin(&rows) {
            warn!(position = "position_fill"; "Filling not well defined when ymin != 0");
        }

        Ok(collide(rows, self.width, "position_fill", fill_rows))
    }
}

/// Fill-adjusts `rows` with the default (zero) width.
///
/// # Errors
///
/// Returns [`PositionError::MissingAesthetic`] if any row lacks `x` or
/// `ymax`.
pub fn adjust_fill(rows: Vec<StackRow>) -> Result<Vec<StackRow>, PositionError> {
    PositionFill::default().compute(rows)
}

/// Stacks one pile and divides it by its total height.
///
/// A pile with no usable total keeps its y fields as given; `xmin` and
/// `xmax` are still the ones derived by the collision step.
fn fill_rows(stack: Vec<StackRow>) -> Vec<StackRow> {
    let mut stacked = stack_rows(stack.clone());
    let total = stacked
        .iter()
        .filter_map(|row| row.ymax)
        .fold(f64::NEG_INFINITY, f64::max);

    if total == 0.0 || !total.is_finite() {
        debug!(total; "Stack has no height to fill");
        return stack;
    }

    for row in &mut stacked {
        row.ymin = row.ymin.map(|ymin| ymin / total);
        row.ymax = row.ymax.map(|ymax| ymax / total);
        row.y = row.ymax;
    }
    stacked
}
