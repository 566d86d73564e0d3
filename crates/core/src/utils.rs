//! Geometry primitives shared by the pipeline stages.
//!
//! Provides:
//! - `Rect`, the integer `(x, y, w, h)` rectangle every stage works on
//! - `HasBBox`, edge accessors for anything with a rectangular extent
//! - `PointPlane`, an R-tree over integer anchor points for range lookups
//!
//! Coordinates follow image conventions: `y` grows downwards, so `top` is the
//! smaller ordinate and `bottom` the larger one.

use rstar::{AABB, RTree, RTreeObject};
use serde::{Deserialize, Serialize};

/// Largest coordinate or extent magnitude a box may carry. Sums and
/// differences of a few edges stay inside `i32` below this bound.
pub const MAX_COORD: i32 = 1 << 28;

/// Axis-aligned integer rectangle, as read from a box table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True when every field lies within `[-MAX_COORD, MAX_COORD]`.
    pub fn in_range(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|v| (-MAX_COORD..=MAX_COORD).contains(v))
    }

    /// Builds a rectangle from its four edges.
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            w: right - left,
            h: bottom - top,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Area as i64 so that large page-sized boxes cannot overflow.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// True when the interiors of the two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when the half-open horizontal ranges `[x, right)` overlap.
    pub fn hoverlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }
}

/// Edge accessors for items with a rectangular extent.
pub trait HasBBox {
    fn x0(&self) -> i32;
    fn y0(&self) -> i32;
    fn x1(&self) -> i32;
    fn y1(&self) -> i32;

    fn bbox(&self) -> Rect {
        Rect::from_edges(self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> i32 {
        self.x1() - self.x0()
    }

    fn height(&self) -> i32 {
        self.y1() - self.y0()
    }
}

impl HasBBox for Rect {
    fn x0(&self) -> i32 {
        self.x
    }
    fn y0(&self) -> i32 {
        self.y
    }
    fn x1(&self) -> i32 {
        self.right()
    }
    fn y1(&self) -> i32 {
        self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlanePoint {
    id: usize,
    point: [i32; 2],
}

impl RTreeObject for PlanePoint {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// A bulk-loaded set of integer points, each tagged with a caller id.
///
/// Ids are whatever the caller passes in; lookups return them in ascending
/// order so results do not depend on tree layout.
pub struct PointPlane {
    tree: RTree<PlanePoint>,
}

impl PointPlane {
    pub fn new(points: impl IntoIterator<Item = (usize, [i32; 2])>) -> Self {
        let nodes: Vec<PlanePoint> = points
            .into_iter()
            .map(|(id, point)| PlanePoint { id, point })
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Ids of all points inside the closed box `[x0, x1] x [y0, y1]`.
    pub fn find(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<usize> {
        let env = AABB::from_corners([x0, y0], [x1, y1]);
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&env)
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
