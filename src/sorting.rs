//! Greedy nearest neighbour ordering of point sets.
//!
//! The walk starts at the first point and keeps hopping to the closest point not visited yet.
//! A [`Quadtree`] holds the unvisited points, candidates are gathered with widening range queries.
use crate::quadtree::{Circle, Quadtree, Queryable, Rectangle, DEFAULT_CAPACITY};
use crate::{Error, Point};
use log::{debug, trace};

/// Shape of the range used to look for the next point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchWindow {
    /// Circle of the current radius. Once few points remain every one of them is a candidate.
    Circle,
    /// Square with a side length of the current radius.
    Square,
}

impl Default for SearchWindow {
    fn default() -> Self {
        SearchWindow::Circle
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortOptions {
    pub window: SearchWindow,
    /// Radius of the first query around the current point, doubled until something is found.
    pub initial_search_radius: f64,
    /// Below this many remaining points the whole tree is scanned instead of queried.
    pub min_size: usize,
    /// Node capacity of the quadtree
    pub capacity: usize,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            window: SearchWindow::Circle,
            initial_search_radius: 2.0,
            min_size: 4,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SortOptions {
    pub fn validate(&self) -> Result<(), Error> {
        let r = self.initial_search_radius;
        if !(r.is_finite() && r > 0.0) {
            return Err(Error::InvalidSearchRadius(r));
        }
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(())
    }
}

/// Reorder `points` so consecutive points are close to each other.
///
/// Points outside of `[0, width] x [0, height]` can not be indexed and are left out of the
/// result. Inputs of at most 2 points are returned as they are.
pub fn sort_by_distance_2d(
    points: &[Point],
    width: f64,
    height: f64,
    options: &SortOptions,
) -> Result<Vec<Point>, Error> {
    if points.len() <= 2 {
        return Ok(points.to_vec());
    }
    options.validate()?;

    let mut tree = Quadtree::new(Rectangle::from_size(width, height), options.capacity)?;
    let inserted = tree.extend(points.iter().cloned());
    if inserted < points.len() {
        debug!(
            "{} of {} points are outside of {}x{} and were dropped",
            points.len() - inserted,
            points.len(),
            width,
            height
        );
    }

    let mut current = match points.iter().find(|p| tree.boundary().contains(p)) {
        Some(p) => *p,
        None => return Ok(Vec::new()),
    };

    let mut sorted = Vec::with_capacity(inserted);
    let mut found = Vec::new();
    let mut circle = Circle::new(0.0, 0.0, options.initial_search_radius);

    loop {
        tree.remove(&current);
        sorted.push(current);
        if tree.is_empty() {
            break;
        }

        found.clear();
        if options.window == SearchWindow::Circle && tree.len() < options.min_size {
            found.extend(tree.iter());
        } else {
            search(&tree, &current, options, &mut circle, &mut found);
        }

        current = closest(&current, &found);
    }

    Ok(sorted)
}

/// Query with a doubling radius until at least one point turns up.
/// Terminates because `tree` is not empty and every point is within its boundary.
fn search(
    tree: &Quadtree,
    center: &Point,
    options: &SortOptions,
    circle: &mut Circle,
    found: &mut Vec<Point>,
) {
    let x = f64::from(center.x());
    let y = f64::from(center.y());
    let mut radius = options.initial_search_radius;
    circle.set_center(x, y);

    loop {
        match options.window {
            SearchWindow::Circle => {
                circle.set_radius(radius);
                tree.query(&*circle, found);
            }
            SearchWindow::Square => {
                tree.query(&Rectangle::new(x, y, radius, radius), found);
            }
        }
        if !found.is_empty() {
            return;
        }
        radius *= 2.0;
        trace!("nothing within {} of {:?}, widening", radius / 2.0, center);
    }
}

/// First candidate with the smallest distance to `from`
fn closest(from: &Point, candidates: &[Point]) -> Point {
    let mut closest = *from;
    let mut closest_dist = u64::MAX;
    for p in candidates {
        let d = from.dist(p);
        if d < closest_dist {
            closest_dist = d;
            closest = *p;
        }
    }
    closest
}

/// Split an ordered run of points wherever two neighbours are at least `max_distance` apart.
pub fn strokes(points: &[Point], max_distance: f64) -> Strokes<'_> {
    Strokes {
        rest: points,
        max_sq: max_distance * max_distance,
    }
}

pub struct Strokes<'a> {
    rest: &'a [Point],
    max_sq: f64,
}

impl<'a> Iterator for Strokes<'a> {
    type Item = &'a [Point];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let max_sq = self.max_sq;
        let end = self
            .rest
            .windows(2)
            .position(|w| w[0].dist(&w[1]) as f64 >= max_sq)
            .map(|i| i + 1)
            .unwrap_or_else(|| self.rest.len());
        let (stroke, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(stroke)
    }
}
