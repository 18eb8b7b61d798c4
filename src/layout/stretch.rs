//! Column stretching: redistributing leftover viewport width.
//!
//! `All` rescales every column proportionally so the stretched widths sum to
//! the target exactly; `Last` grows or shrinks only the final column. Widths
//! are memoized per column between full redraws.

use serde::{Deserialize, Serialize};

/// How leftover viewport width is redistributed among columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StretchMode {
    /// Columns keep their natural widths.
    #[default]
    None,
    /// The last column absorbs the difference to the viewport width.
    Last,
    /// Every column is scaled proportionally.
    All,
}

/// Memoized stretched-width table for the column axis.
///
/// Refreshed on every full draw; width lookups between refreshes reuse the
/// memoized values.
#[derive(Debug, Clone)]
pub struct ColumnStretch {
    mode: StretchMode,
    total_count: u32,
    total_target_width: f32,
    sum_all: f32,
    all_ratio: f32,
    last_column_width: Option<f32>,
    stretched: Vec<Option<f32>>,
    needs_sum_check: bool,
}

impl ColumnStretch {
    pub fn new(mode: StretchMode) -> Self {
        Self {
            mode,
            total_count: 0,
            total_target_width: 0.0,
            sum_all: 0.0,
            all_ratio: 0.0,
            last_column_width: None,
            stretched: Vec::new(),
            needs_sum_check: false,
        }
    }

    pub fn mode(&self) -> StretchMode {
        self.mode
    }

    /// Recompute the stretch state for the given target width and natural
    /// column widths. Clears all memoized widths.
    pub fn refresh_stretching(
        &mut self,
        total_target_width: f32,
        total_count: u32,
        natural_width: &dyn Fn(u32) -> Option<f32>,
        default_width: f32,
    ) {
        self.total_count = total_count;
        self.total_target_width = total_target_width;
        self.stretched.clear();
        self.stretched.resize(total_count as usize, None);
        self.all_ratio = 0.0;
        self.last_column_width = None;
        self.needs_sum_check = false;

        let mut sum_all = 0.0f32;
        for col in 0..total_count {
            sum_all += natural_width(col).unwrap_or(default_width);
        }
        self.sum_all = sum_all;

        if total_count == 0 || sum_all <= 0.0 {
            return;
        }

        match self.mode {
            StretchMode::All => {
                if (sum_all - total_target_width).abs() > f32::EPSILON {
                    self.all_ratio = total_target_width / sum_all;
                    self.needs_sum_check = true;
                }
            }
            StretchMode::Last => {
                // A shrink past zero or an unbounded viewport leaves the
                // column at its natural width.
                if total_target_width.is_finite() {
                    let last_natural =
                        natural_width(total_count - 1).unwrap_or(default_width);
                    let width = last_natural - (sum_all - total_target_width);
                    if width > 0.0 {
                        self.last_column_width = Some(width);
                    }
                }
            }
            StretchMode::None => {}
        }
    }

    /// Stretched width for a column, or `None` when the column keeps its
    /// natural width under the current mode.
    pub fn stretched_width(&mut self, column: u32, natural_width: f32) -> Option<f32> {
        match self.mode {
            StretchMode::All if self.all_ratio > 0.0 => {
                Some(self.stretched_all_width(column, natural_width))
            }
            StretchMode::Last => {
                if column + 1 == self.total_count {
                    self.last_column_width
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn stretched_all_width(&mut self, column: u32, natural_width: f32) -> f32 {
        let index = column as usize;
        if self
            .stretched
            .get(index)
            .copied()
            .flatten()
            .is_none()
        {
            let width = (natural_width * self.all_ratio).round();
            if let Some(slot) = self.stretched.get_mut(index) {
                *slot = Some(width);
            }
        }

        // Once every column is memoized, fold the rounding remainder into the
        // last column so the sum matches the target exactly.
        if self.needs_sum_check && self.stretched.iter().all(|w| w.is_some()) {
            self.needs_sum_check = false;
            let actual: f32 = self.stretched.iter().flatten().sum();
            let remainder = self.total_target_width - actual;
            if remainder.abs() > 0.0 {
                if let Some(last) = self.stretched.last_mut() {
                    if let Some(width) = last.as_mut() {
                        *width += remainder;
                    }
                }
            }
        }

        self.stretched
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(natural_width)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn widths_after_refresh(
        mode: StretchMode,
        natural: &[f32],
        target: f32,
    ) -> Vec<f32> {
        let naturals = natural.to_vec();
        let mut stretch = ColumnStretch::new(mode);
        let count = u32::try_from(naturals.len()).unwrap();
        let lookup = |i: u32| naturals.get(i as usize).copied();
        stretch.refresh_stretching(target, count, &lookup, 50.0);
        (0..count)
            .map(|i| {
                let natural = naturals[i as usize];
                stretch.stretched_width(i, natural).unwrap_or(natural)
            })
            .collect()
    }

    #[test_case(&[50.0, 50.0, 50.0], 300.0 ; "grow uniform")]
    #[test_case(&[50.0, 50.0, 50.0], 100.0 ; "shrink uniform")]
    #[test_case(&[33.0, 77.0, 10.0, 113.0], 450.0 ; "grow irregular")]
    #[test_case(&[33.0, 77.0, 10.0, 113.0], 97.0 ; "shrink irregular")]
    #[test_case(&[64.0], 1000.0 ; "single column")]
    fn stretch_all_sums_exactly_to_target(natural: &[f32], target: f32) {
        let widths = widths_after_refresh(StretchMode::All, natural, target);
        let sum: f32 = widths.iter().sum();
        assert_eq!(sum, target);
    }

    #[test]
    fn stretch_all_remainder_lands_in_last_column() {
        // 3 × 50 stretched to 200: ratio 4/3 rounds each to 67, sum 201;
        // the last column gives the extra pixel back.
        let widths = widths_after_refresh(StretchMode::All, &[50.0, 50.0, 50.0], 200.0);
        assert_eq!(widths[0], 67.0);
        assert_eq!(widths[1], 67.0);
        assert_eq!(widths[2], 66.0);
    }

    #[test]
    fn stretch_all_noop_when_already_exact() {
        let mut stretch = ColumnStretch::new(StretchMode::All);
        stretch.refresh_stretching(150.0, 3, &|_| Some(50.0), 50.0);
        assert_eq!(stretch.stretched_width(1, 50.0), None);
    }

    #[test]
    fn stretch_last_replaces_only_the_final_column() {
        let widths = widths_after_refresh(StretchMode::Last, &[50.0, 50.0, 50.0], 300.0);
        assert_eq!(widths, vec![50.0, 50.0, 200.0]);
    }

    #[test]
    fn stretch_last_ignores_unbounded_viewport() {
        let widths = widths_after_refresh(StretchMode::Last, &[50.0, 50.0], f32::INFINITY);
        assert_eq!(widths, vec![50.0, 50.0]);
    }

    #[test]
    fn stretch_last_never_collapses_below_zero() {
        // Target smaller than the other columns' sum would drive the last
        // column negative; it keeps its natural width instead.
        let widths = widths_after_refresh(StretchMode::Last, &[50.0, 50.0, 50.0], 90.0);
        assert_eq!(widths, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn mode_none_keeps_natural_widths() {
        let widths = widths_after_refresh(StretchMode::None, &[10.0, 20.0], 500.0);
        assert_eq!(widths, vec![10.0, 20.0]);
    }

    #[test]
    fn memoized_widths_are_stable_between_lookups() {
        let mut stretch = ColumnStretch::new(StretchMode::All);
        stretch.refresh_stretching(200.0, 3, &|_| Some(50.0), 50.0);
        let first = stretch.stretched_width(0, 50.0);
        let again = stretch.stretched_width(0, 50.0);
        assert_eq!(first, again);
    }

    #[test]
    fn empty_axis_is_a_noop() {
        let mut stretch = ColumnStretch::new(StretchMode::All);
        stretch.refresh_stretching(200.0, 0, &|_| None, 50.0);
        assert_eq!(stretch.stretched_width(0, 50.0), None);
    }
}
