use log::{info, warn};

use super::{PositionAdjustment, StackRow, collide, has_offset_ymin, missing_aesthetics};
use crate::error::PositionError;

/// Piles rows sharing an x interval on top of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionStack {
    width: Option<f64>,
}

impl PositionStack {
    /// Creates a stack adjustment; `width` sizes intervals derived from `x`.
    pub fn new(width: Option<f64>) -> Self {
        Self { width }
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }
}

impl PositionAdjustment for PositionStack {
    fn compute(&self, mut rows: Vec<StackRow>) -> Result<Vec<StackRow>, PositionError> {
        if rows.is_empty() {
            return Ok(rows);
        }

        let missing = missing_aesthetics(&rows, &["x"]);
        if !missing.is_empty() {
            return Err(PositionError::MissingAesthetic {
                position: "position_stack",
                missing,
            });
        }

        if rows.iter().all(|row| row.y.is_none() && row.ymax.is_none()) {
            info!("Missing y and ymax in position stack, rows left unchanged");
            return Ok(rows);
        }

        for row in &mut rows {
            if row.ymax.is_none() {
                row.ymax = row.y;
            }
        }

        if has_offset_ymin(&rows) {
            warn!(position = "position_stack"; "Stacking not well defined when ymin != 0");
        }

        Ok(collide(rows, self.width, "position_stack", stack_rows))
    }
}

/// Replaces each row's extent with its slice of the running total.
pub(super) fn stack_rows(mut stack: Vec<StackRow>) -> Vec<StackRow> {
    let mut total = 0.0;
    for row in &mut stack {
        let height = row.height();
        row.ymin = Some(total);
        total += height;
        row.ymax = Some(total);
        row.y = row.ymax;
    }
    stack
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_stack_accumulates_heights() {
        let rows = vec![
            StackRow::new(1.0, 0.0, 2.0).with_group(1),
            StackRow::new(1.0, 0.0, 3.0).with_group(2),
            StackRow::new(2.0, 0.0, 4.0).with_group(1),
        ];

        let stacked = PositionStack::default().compute(rows).unwrap();

        let extents: Vec<_> = stacked.iter().map(|row| (row.ymin, row.ymax)).collect();
        assert_eq!(
            extents,
            [
                (Some(0.0), Some(2.0)),
                (Some(2.0), Some(5.0)),
                (Some(0.0), Some(4.0)),
            ]
        );
        assert_eq!(stacked[1].y, Some(5.0));
    }

    #[test]
    fn test_stack_uses_y_when_ymax_is_missing() {
        let rows = vec![
            StackRow {
                x: Some(1.0),
                y: Some(1.5),
                ..StackRow::default()
            },
            StackRow {
                x: Some(1.0),
                y: Some(2.5),
                group: 1,
                ..StackRow::default()
            },
        ];

        let stacked = PositionStack::new(Some(0.9)).compute(rows).unwrap();
        assert_approx_eq!(f64, stacked[1].ymin.unwrap(), 1.5);
        assert_approx_eq!(f64, stacked[1].ymax.unwrap(), 4.0);
    }

    #[test]
    fn test_stack_without_heights_is_unchanged() {
        let rows = vec![StackRow {
            x: Some(1.0),
            ..StackRow::default()
        }];
        assert_eq!(PositionStack::default().compute(rows.clone()).unwrap(), rows);
    }

    #[test]
    fn test_stack_requires_x() {
        let rows = vec![StackRow {
            y: Some(1.0),
            ..StackRow::default()
        }];
        assert_eq!(
            PositionStack::default().compute(rows),
            Err(PositionError::MissingAesthetic {
                position: "position_stack",
                missing: vec!["x"],
            })
        );
    }

    #[test]
    fn test_missing_height_counts_as_zero() {
        let stacked = stack_rows(vec![
            StackRow::new(1.0, 0.0, 1.0),
            StackRow::new(1.0, 0.0, f64::NAN),
            StackRow::new(1.0, 0.0, 2.0),
        ]);
        let tops: Vec<_> = stacked.iter().map(|row| row.ymax).collect();
        assert_eq!(tops, [Some(1.0), Some(1.0), Some(3.0)]);
    }
}
