use crate::Point;

/// A range the [`Quadtree`](super::Quadtree) can be queried with.
pub trait Queryable {
    /// Whether the range overlaps `boundary`. Nodes failing this test are pruned.
    fn intersects(&self, boundary: &Rectangle) -> bool;
    fn contains(&self, point: &Point) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Axis aligned box given by its center and full width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            left: x - w / 2.0,
            right: x + w / 2.0,
            top: y - h / 2.0,
            bottom: y + h / 2.0,
        }
    }

    /// The box covering `[0, w] x [0, h]`
    pub fn from_size(w: f64, h: f64) -> Self {
        Self::new(w / 2.0, h / 2.0, w, h)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Half-size child box. North is towards smaller `y`.
    pub fn subdivide(&self, quadrant: Quadrant) -> Self {
        let (dx, dy) = match quadrant {
            Quadrant::NorthEast => (1.0, -1.0),
            Quadrant::NorthWest => (-1.0, -1.0),
            Quadrant::SouthEast => (1.0, 1.0),
            Quadrant::SouthWest => (-1.0, 1.0),
        };
        Self::new(
            self.x + dx * self.w / 4.0,
            self.y + dy * self.h / 4.0,
            self.w / 2.0,
            self.h / 2.0,
        )
    }
}

impl Queryable for Rectangle {
    fn contains(&self, point: &Point) -> bool {
        let x = f64::from(point.x());
        let y = f64::from(point.y());
        self.left <= x && x <= self.right && self.top <= y && y <= self.bottom
    }

    fn intersects(&self, range: &Rectangle) -> bool {
        !(self.right < range.left
            || range.right < self.left
            || self.bottom < range.top
            || range.bottom < self.top)
    }
}

/// Circular query range.
///
/// Center and radius can be reassigned so a single value serves a whole series of widening
/// searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    x: f64,
    y: f64,
    r: f64,
    r_squared: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self {
            x,
            y,
            r,
            r_squared: r * r,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn radius(&self) -> f64 {
        self.r
    }

    pub fn set_center(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_radius(&mut self, r: f64) {
        self.r = r;
        self.r_squared = r * r;
    }
}

impl Queryable for Circle {
    fn contains(&self, point: &Point) -> bool {
        let dx = f64::from(point.x()) - self.x;
        let dy = f64::from(point.y()) - self.y;
        dx * dx + dy * dy <= self.r_squared
    }

    fn intersects(&self, range: &Rectangle) -> bool {
        let x_dist = (range.x - self.x).abs();
        let y_dist = (range.y - self.y).abs();

        let w = range.w / 2.0;
        let h = range.h / 2.0;

        if x_dist > self.r + w || y_dist > self.r + h {
            return false;
        }

        // center of the circle lies within one of the box's bands
        if x_dist <= w || y_dist <= h {
            return true;
        }

        // closest corner
        let edges = (x_dist - w).powi(2) + (y_dist - h).powi(2);
        edges <= self.r_squared
    }
}
