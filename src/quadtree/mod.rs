//! Region quadtree over packed points.
//!
//! Supports removal, so it can be drained point by point while walking a path.
mod shapes;
#[cfg(test)]
mod tests;

pub use shapes::*;

use crate::{Error, Point};
use arrayvec::ArrayVec;

pub const DEFAULT_CAPACITY: usize = 16;

/// Nodes this deep never split, they accept points past their capacity instead.
/// Stops coincident points from subdividing forever.
pub const MAX_DEPTH: u8 = 16;

// a depth first traversal holds at most 3 pending siblings per level plus the root
const STACK_LEN: usize = 64;

// insertion and traversal order of the children
const NE: usize = 0;
const NW: usize = 1;
const SE: usize = 2;
const SW: usize = 3;
const QUERY_ORDER: [usize; 4] = [NW, NE, SW, SE];

type Children = Option<Box<[Quadtree; 4]>>;

#[derive(Debug, Clone)]
pub struct Quadtree {
    boundary: Rectangle,
    capacity: usize,
    depth: u8,
    // number of points in this subtree
    size: usize,

    children: Children,

    items: Vec<Point>,
}

impl Quadtree {
    pub fn new(boundary: Rectangle, capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        let (w, h) = (boundary.width(), boundary.height());
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(Error::DegenerateBoundary {
                width: w,
                height: h,
            });
        }
        Ok(Self::node(boundary, capacity, 0))
    }

    pub fn with_default_capacity(boundary: Rectangle) -> Result<Self, Error> {
        Self::new(boundary, DEFAULT_CAPACITY)
    }

    fn node(boundary: Rectangle, capacity: usize, depth: u8) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            size: 0,
            children: None,
            // capacity is caller supplied, only preallocate a bounded amount
            items: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
        }
    }

    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of points in the whole tree
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.size = 0;
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.clear();
            }
        }
    }

    /// Insert every point, return how many were accepted.
    pub fn extend<It>(&mut self, it: It) -> usize
    where
        It: IntoIterator<Item = Point>,
    {
        it.into_iter().filter(|p| self.insert(*p)).count()
    }

    /// Return if the insertion was successful.
    /// Fails only for points outside of the boundary.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.boundary.contains(&point) {
            return false;
        }

        if self.items.len() < self.capacity || self.depth >= MAX_DEPTH {
            self.items.push(point);
            self.size += 1;
            return true;
        }

        if self.children.is_none() {
            self.split();
        }

        let inserted = match self.children.as_mut() {
            Some(children) => children.iter_mut().any(|c| c.insert(point)),
            None => false,
        };
        if inserted {
            self.size += 1;
        }
        inserted
    }

    fn split(&mut self) {
        debug_assert!(self.children.is_none());

        let b = self.boundary;
        let depth = self.depth + 1;
        let cap = self.capacity;
        self.children = Some(Box::new([
            Self::node(b.subdivide(Quadrant::NorthEast), cap, depth),
            Self::node(b.subdivide(Quadrant::NorthWest), cap, depth),
            Self::node(b.subdivide(Quadrant::SouthEast), cap, depth),
            Self::node(b.subdivide(Quadrant::SouthWest), cap, depth),
        ]));
    }

    /// Remove one point equal to `point`.
    pub fn remove(&mut self, point: &Point) -> bool {
        if !self.boundary.contains(point) {
            return false;
        }

        if let Some(i) = self.items.iter().position(|p| p == point) {
            self.items.remove(i);
            self.size -= 1;
            return true;
        }

        let removed = match self.children.as_mut() {
            Some(children) => children.iter_mut().any(|c| c.remove(point)),
            None => false,
        };
        if removed {
            self.size -= 1;
        }
        removed
    }

    pub fn contains(&self, point: &Point) -> bool {
        if !self.boundary.contains(point) {
            return false;
        }

        if self.items.iter().any(|p| p == point) {
            return true;
        }

        if let Some(ref children) = self.children {
            return children.iter().any(|c| c.contains(point));
        }
        false
    }

    /// Push every point inside `range` to `out`.
    pub fn query<Q: Queryable + ?Sized>(&self, range: &Q, out: &mut Vec<Point>) {
        if !range.intersects(&self.boundary) {
            return;
        }

        for p in self.items.iter() {
            if range.contains(p) {
                out.push(*p);
            }
        }

        if let Some(ref children) = self.children {
            for &i in QUERY_ORDER.iter() {
                children[i].query(range, out);
            }
        }
    }

    /// Visit every point: a node's own points first, then its children's subtrees in
    /// ne, nw, se, sw order.
    pub fn iter(&self) -> Iter<'_> {
        let mut stack = ArrayVec::new();
        stack.push(self);
        let empty: &[Point] = &[];
        Iter {
            stack,
            current: empty.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Quadtree {
    type Item = Point;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    stack: ArrayVec<[&'a Quadtree; STACK_LEN]>,
    current: std::slice::Iter<'a, Point>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if let Some(p) = self.current.next() {
                return Some(*p);
            }
            let node = self.stack.pop()?;
            if let Some(ref children) = node.children {
                for &i in [SW, SE, NW, NE].iter() {
                    self.stack.push(&children[i]);
                }
            }
            self.current = node.items.iter();
        }
    }
}
