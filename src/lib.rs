//! Turn a raster image into an ordered run of edge points for continuous-line rendering.
//! # Contracts:
//! - Point axes must be integers in the interval [-16383, 16384]
//! - Out of range coordinates wrap inside their 15 bit field, they are not reported
//!
pub mod edges;
pub mod error;
pub mod pipeline;
pub mod quadtree;
pub mod sampling;
pub mod sorting;

pub use edges::{extract_edge_points, BitDepth, RgbaView};
pub use error::Error;
pub use pipeline::{PointTransform, TransformConfig};
pub use quadtree::{Circle, Quadtree, Queryable, Rectangle};
pub use sampling::{dropout, dropout_random, fit_dimensions, rescale, Dimensions};
pub use sorting::{sort_by_distance_2d, strokes, SearchWindow, SortOptions};

use std::fmt;

/// Bits reserved for a single axis.
pub const AXIS_BITS: u32 = 15;
const AXIS_MASK: u32 = (1 << AXIS_BITS) - 1;
/// Added to both axes before packing so negative values stay unsigned.
pub const OFFSET: i32 = (AXIS_MASK / 2) as i32;
const X_MASK: u32 = AXIS_MASK << AXIS_BITS;
const Y_MASK: u32 = AXIS_MASK;

pub const MIN_COORD: i32 = -OFFSET;
pub const MAX_COORD: i32 = AXIS_MASK as i32 - OFFSET;

/// A 2D integer point packed into a single word.
///
/// `x` lives in the high 15 bits, `y` in the low 15 bits. Equality and hashing compare the
/// packed word.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point(u32);

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        let mut p = Self(0);
        p.set_x(x);
        p.set_y(y);
        p
    }

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> i32 {
        ((self.0 & X_MASK) >> AXIS_BITS) as i32 - OFFSET
    }

    #[inline]
    pub fn y(&self) -> i32 {
        (self.0 & Y_MASK) as i32 - OFFSET
    }

    // Values outside [MIN_COORD, MAX_COORD] wrap around inside the field
    pub fn set_x(&mut self, x: i32) {
        let val = x.wrapping_add(OFFSET) as u32;
        self.0 = (self.0 & !X_MASK) | ((val << AXIS_BITS) & X_MASK);
    }

    pub fn set_y(&mut self, y: i32) {
        let val = y.wrapping_add(OFFSET) as u32;
        self.0 = (self.0 & !Y_MASK) | (val & Y_MASK);
    }

    /// Squared euclidean distance
    pub fn dist(&self, rhs: &Self) -> u64 {
        let x = i64::from(self.x() - rhs.x());
        let y = i64::from(self.y() - rhs.y());
        (x * x + y * y) as u64
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x(), self.y())
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [i32; 2] {
    fn from(p: Point) -> Self {
        [p.x(), p.y()]
    }
}
