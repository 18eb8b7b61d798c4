//! Grid coordinates and track addressing.
//!
//! A [`GridCoord`] addresses a cell as a (row, col) pair of signed indices.
//! Negative indices address header tracks (a negative row is a column-header
//! row, a negative col is a row-header column); [`Track`] is the explicit form
//! of that encoding for code that needs to branch on header vs. data.

use serde::Serialize;

/// A (row, col) cell address. Cheap, immutable value type.
///
/// Either component may be negative, which addresses a header track rather
/// than a data cell — see [`Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCoord {
    pub row: i32,
    pub col: i32,
}

impl GridCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True if this coordinate addresses a header track on either axis.
    pub fn is_header(&self) -> bool {
        self.row < 0 || self.col < 0
    }

    /// Row address as an explicit track.
    pub fn row_track(&self) -> Track {
        Track::from_signed(self.row)
    }

    /// Column address as an explicit track.
    pub fn col_track(&self) -> Track {
        Track::from_signed(self.col)
    }

    /// Non-strict: at or above and at or left of `other`.
    pub fn is_north_west_of(&self, other: &GridCoord) -> bool {
        self.row <= other.row && self.col <= other.col
    }

    /// Non-strict: at or below and at or right of `other`.
    pub fn is_south_east_of(&self, other: &GridCoord) -> bool {
        self.row >= other.row && self.col >= other.col
    }

    /// Non-strict: at or above and at or right of `other`.
    pub fn is_north_east_of(&self, other: &GridCoord) -> bool {
        self.row <= other.row && self.col >= other.col
    }

    /// Non-strict: at or below and at or left of `other`.
    pub fn is_south_west_of(&self, other: &GridCoord) -> bool {
        self.row >= other.row && self.col <= other.col
    }
}

/// One axis position, split into header and data space.
///
/// The signed encoding maps `Data(i)` to `i` and `Header(i)` to `-(i + 1)`,
/// so `Header(0)` is the track adjacent to the data (`-1`), `Header(1)` the
/// next one out (`-2`), and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Header track, indexed outward from the data region.
    Header(u32),
    /// Data track at the given logical index.
    Data(u32),
}

impl Track {
    /// Decode a signed axis index.
    pub fn from_signed(index: i32) -> Self {
        if index < 0 {
            Track::Header(index.unsigned_abs() - 1)
        } else {
            Track::Data(index.unsigned_abs())
        }
    }

    /// Encode back into the signed convention.
    pub fn to_signed(self) -> i32 {
        match self {
            Track::Header(i) => i32::try_from(i).map_or(i32::MIN, |v| -v - 1),
            Track::Data(i) => i32::try_from(i).unwrap_or(i32::MAX),
        }
    }

    /// True for header tracks.
    pub fn is_header(self) -> bool {
        matches!(self, Track::Header(_))
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

    #[test]
    fn directional_comparisons_are_non_strict() {
        let a = GridCoord::new(2, 2);
        let b = GridCoord::new(5, 5);

        assert!(a.is_north_west_of(&b));
        assert!(b.is_south_east_of(&a));
        // A coordinate relates to itself in every direction
        assert!(a.is_north_west_of(&a));
        assert!(a.is_south_east_of(&a));
        assert!(a.is_north_east_of(&a));
        assert!(a.is_south_west_of(&a));
    }

    #[test]
    fn diagonal_comparisons() {
        let ne = GridCoord::new(1, 8);
        let sw = GridCoord::new(6, 2);

        assert!(ne.is_north_east_of(&sw));
        assert!(sw.is_south_west_of(&ne));
        assert!(!ne.is_north_west_of(&sw));
        assert!(!ne.is_south_east_of(&sw));
    }

    #[test]
    fn header_coords_compare_like_data_coords() {
        // Header rows sit "north" of every data row
        let header = GridCoord::new(-1, 3);
        let data = GridCoord::new(0, 3);
        assert!(header.is_north_west_of(&data));
        assert!(data.is_south_east_of(&header));
    }

    #[test]
    fn track_signed_round_trip() {
        for signed in [-3, -2, -1, 0, 1, 2, 100] {
            assert_eq!(Track::from_signed(signed).to_signed(), signed);
        }
        assert_eq!(Track::from_signed(-1), Track::Header(0));
        assert_eq!(Track::from_signed(-2), Track::Header(1));
        assert_eq!(Track::from_signed(0), Track::Data(0));
        assert!(Track::Header(0).is_header());
        assert!(!Track::Data(0).is_header());
    }

    #[test]
    fn coord_track_views() {
        let c = GridCoord::new(-2, 4);
        assert!(c.is_header());
        assert_eq!(c.row_track(), Track::Header(1));
        assert_eq!(c.col_track(), Track::Data(4));
    }
}
