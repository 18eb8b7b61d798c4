//! Cell ranges for selection and overlay geometry.
//!
//! A [`GridRange`] is an ordered pair of coordinates plus a highlight anchor.
//! `from`/`to` keep the gesture order (drag start to drag end); corner
//! accessors normalize by coordinate magnitude only, so callers never care
//! which end is structurally first.

use crate::coords::GridCoord;

/// Orientation of `from` relative to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `from` is the top-left corner.
    NwSe,
    /// `from` is the top-right corner.
    NeSw,
    /// `from` is the bottom-right corner.
    SeNw,
    /// `from` is the bottom-left corner.
    SwNe,
}

/// A rectangular span of cells anchored at `highlight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
    pub from: GridCoord,
    pub to: GridCoord,
    /// The coordinate further interactive extension pivots around.
    pub highlight: GridCoord,
}

impl GridRange {
    pub fn new(from: GridCoord, to: GridCoord, highlight: GridCoord) -> Self {
        Self {
            from,
            to,
            highlight,
        }
    }

    /// A single-cell range anchored at `coord`.
    pub fn single(coord: GridCoord) -> Self {
        Self::new(coord, coord, coord)
    }

    pub fn top_left(&self) -> GridCoord {
        GridCoord::new(
            self.from.row.min(self.to.row),
            self.from.col.min(self.to.col),
        )
    }

    pub fn bottom_right(&self) -> GridCoord {
        GridCoord::new(
            self.from.row.max(self.to.row),
            self.from.col.max(self.to.col),
        )
    }

    pub fn top_right(&self) -> GridCoord {
        GridCoord::new(
            self.from.row.min(self.to.row),
            self.from.col.max(self.to.col),
        )
    }

    pub fn bottom_left(&self) -> GridCoord {
        GridCoord::new(
            self.from.row.max(self.to.row),
            self.from.col.min(self.to.col),
        )
    }

    /// Orientation of the gesture. Ties resolve in NW-SE, NE-SW, SE-NW,
    /// SW-NE order, so a single-cell range reports `NwSe`.
    pub fn direction(&self) -> Direction {
        if self.from.is_north_west_of(&self.to) {
            Direction::NwSe
        } else if self.from.is_north_east_of(&self.to) {
            Direction::NeSw
        } else if self.from.is_south_east_of(&self.to) {
            Direction::SeNw
        } else {
            Direction::SwNe
        }
    }

    /// Re-orient `from`/`to` onto the current bounding box corners for the
    /// given direction. The box itself is unchanged.
    pub fn set_direction(&mut self, direction: Direction) {
        let (from, to) = match direction {
            Direction::NwSe => (self.top_left(), self.bottom_right()),
            Direction::NeSw => (self.top_right(), self.bottom_left()),
            Direction::SeNw => (self.bottom_right(), self.top_left()),
            Direction::SwNe => (self.bottom_left(), self.top_right()),
        };
        self.from = from;
        self.to = to;
    }

    /// Number of rows spanned.
    pub fn row_count(&self) -> u32 {
        (self.bottom_right().row - self.top_left().row).unsigned_abs() + 1
    }

    /// Number of columns spanned.
    pub fn col_count(&self) -> u32 {
        (self.bottom_right().col - self.top_left().col).unsigned_abs() + 1
    }

    /// Point containment, header tracks included.
    pub fn includes(&self, coord: &GridCoord) -> bool {
        let tl = self.top_left();
        let br = self.bottom_right();
        tl.row <= coord.row && coord.row <= br.row && tl.col <= coord.col && coord.col <= br.col
    }

    /// Whole-range containment.
    pub fn includes_range(&self, other: &GridRange) -> bool {
        self.includes(&other.top_left()) && self.includes(&other.bottom_right())
    }

    /// True if the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &GridRange) -> bool {
        let tl = self.top_left();
        let br = self.bottom_right();
        let otl = other.top_left();
        let obr = other.bottom_right();
        otl.row <= br.row && obr.row >= tl.row && otl.col <= br.col && obr.col >= tl.col
    }

    /// Grow the range to include `coord`. Returns false if it was already
    /// inside. The gesture direction (and with it the anchor's side) is
    /// preserved across the mutation.
    pub fn expand(&mut self, coord: GridCoord) -> bool {
        if self.includes(&coord) {
            return false;
        }
        let direction = self.direction();
        let tl = self.top_left();
        let br = self.bottom_right();
        self.from = GridCoord::new(tl.row.min(coord.row), tl.col.min(coord.col));
        self.to = GridCoord::new(br.row.max(coord.row), br.col.max(coord.col));
        self.set_direction(direction);
        true
    }

    /// Merge with an overlapping range, growing to the combined bounding box.
    /// Returns false when `other` is already contained or does not overlap
    /// (disjoint ranges stay separate selection regions).
    pub fn expand_by_range(&mut self, other: &GridRange) -> bool {
        if self.includes_range(other) || !self.overlaps(other) {
            return false;
        }
        let direction = self.direction();
        let tl = self.top_left();
        let br = self.bottom_right();
        let otl = other.top_left();
        let obr = other.bottom_right();
        self.from = GridCoord::new(tl.row.min(otl.row), tl.col.min(otl.col));
        self.to = GridCoord::new(br.row.max(obr.row), br.col.max(obr.col));
        self.set_direction(direction);
        true
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

    fn range(fr: i32, fc: i32, tr: i32, tc: i32) -> GridRange {
        GridRange::new(
            GridCoord::new(fr, fc),
            GridCoord::new(tr, tc),
            GridCoord::new(fr, fc),
        )
    }

    #[test]
    fn corners_ignore_structural_order() {
        let r = range(5, 5, 2, 2);
        assert_eq!(r.top_left(), GridCoord::new(2, 2));
        assert_eq!(r.bottom_right(), GridCoord::new(5, 5));

        let r = range(2, 5, 5, 2);
        assert_eq!(r.top_left(), GridCoord::new(2, 2));
        assert_eq!(r.bottom_right(), GridCoord::new(5, 5));
    }

    #[test]
    fn direction_reflects_gesture() {
        assert_eq!(range(1, 1, 4, 4).direction(), Direction::NwSe);
        assert_eq!(range(1, 4, 4, 1).direction(), Direction::NeSw);
        assert_eq!(range(4, 4, 1, 1).direction(), Direction::SeNw);
        assert_eq!(range(4, 1, 1, 4).direction(), Direction::SwNe);
        // Single cell resolves to the first match
        assert_eq!(range(3, 3, 3, 3).direction(), Direction::NwSe);
    }

    #[test]
    fn includes_and_overlaps() {
        let r = range(2, 2, 5, 5);
        assert!(r.includes(&GridCoord::new(2, 2)));
        assert!(r.includes(&GridCoord::new(5, 5)));
        assert!(r.includes(&GridCoord::new(3, 4)));
        assert!(!r.includes(&GridCoord::new(1, 3)));
        assert!(!r.includes(&GridCoord::new(3, 6)));

        assert!(r.overlaps(&range(5, 5, 8, 8)));
        assert!(r.overlaps(&range(0, 0, 2, 2)));
        assert!(!r.overlaps(&range(6, 6, 8, 8)));
        assert!(r.includes_range(&range(3, 3, 4, 4)));
        assert!(!r.includes_range(&range(3, 3, 6, 4)));
    }

    #[test]
    fn expand_grows_to_bounding_box() {
        let mut r = range(2, 2, 4, 4);
        assert!(!r.expand(GridCoord::new(3, 3)));

        assert!(r.expand(GridCoord::new(6, 1)));
        assert_eq!(r.top_left(), GridCoord::new(2, 1));
        assert_eq!(r.bottom_right(), GridCoord::new(6, 4));
        // Gesture started at the top-left, so from stays there
        assert_eq!(r.from, GridCoord::new(2, 1));
        assert_eq!(r.direction(), Direction::NwSe);
    }

    #[test]
    fn expand_preserves_reverse_gesture() {
        // Drag started at the bottom-right corner
        let mut r = range(4, 4, 1, 1);
        assert!(r.expand(GridCoord::new(0, 6)));
        assert_eq!(r.top_left(), GridCoord::new(0, 1));
        assert_eq!(r.bottom_right(), GridCoord::new(4, 6));
        assert_eq!(r.direction(), Direction::SeNw);
        assert_eq!(r.from, GridCoord::new(4, 6));
    }

    #[test]
    fn expand_by_range_merges_overlapping() {
        let mut r = range(2, 2, 4, 4);
        let other = range(3, 3, 6, 6);
        assert!(r.expand_by_range(&other));
        assert_eq!(r.top_left(), GridCoord::new(2, 2));
        assert_eq!(r.bottom_right(), GridCoord::new(6, 6));
    }

    #[test]
    fn expand_by_range_rejects_contained_and_disjoint() {
        let mut r = range(2, 2, 6, 6);
        assert!(!r.expand_by_range(&range(3, 3, 4, 4)));
        assert!(!r.expand_by_range(&range(8, 8, 9, 9)));
        assert_eq!(r.top_left(), GridCoord::new(2, 2));
        assert_eq!(r.bottom_right(), GridCoord::new(6, 6));
    }

    #[test]
    fn spans() {
        let r = range(5, 1, 2, 4);
        assert_eq!(r.row_count(), 4);
        assert_eq!(r.col_count(), 4);
    }
}
