//! Thinning and rescaling of point sets.
use crate::Point;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Keep roughly `percentage` of `list`, evenly spaced by index.
///
/// Index `i` survives iff `floor(i * p) != floor((i + 1) * p)`, which keeps exactly
/// `floor(len * p)` items.
pub fn dropout<T: Clone>(list: &[T], percentage: f64) -> Vec<T> {
    list.iter()
        .enumerate()
        .filter(|(i, _)| {
            let i = *i as f64;
            (i * percentage).floor() != ((i + 1.0) * percentage).floor()
        })
        .map(|(_, item)| item.clone())
        .collect()
}

/// Keep every item independently with probability `percentage`.
pub fn dropout_random<T, R>(list: &[T], percentage: f64, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    list.iter()
        .filter(|_| rng.gen::<f64>() <= percentage)
        .cloned()
        .collect()
}

/// Map points from `source` space to `target` space, flooring the scaled coordinates.
///
/// `source` must have a nonzero width and height.
pub fn rescale(points: &[Point], source: Dimensions, target: Dimensions) -> Vec<Point> {
    debug_assert!(
        source.width > 0 && source.height > 0,
        "rescale from empty source {:?}",
        source
    );
    let sx = f64::from(target.width) / f64::from(source.width);
    let sy = f64::from(target.height) / f64::from(source.height);
    points
        .iter()
        .map(|p| {
            Point::new(
                (f64::from(p.x()) * sx).floor() as i32,
                (f64::from(p.y()) * sy).floor() as i32,
            )
        })
        .collect()
}

/// Scale `source` so it fits `target` along its dominant axis, keeping the aspect ratio.
pub fn fit_dimensions(source: Dimensions, target: Dimensions) -> Dimensions {
    let source_aspect = f64::from(source.width) / f64::from(source.height);
    let target_aspect = f64::from(target.width) / f64::from(target.height);
    let scale = if source_aspect > target_aspect {
        f64::from(target.width) / f64::from(source.width)
    } else {
        f64::from(target.height) / f64::from(source.height)
    };
    Dimensions {
        width: (f64::from(source.width) * scale).round() as u32,
        height: (f64::from(source.height) * scale).round() as u32,
    }
}
