//! Image to ordered point sequence.
//!
//! extract edges -> dropout -> nearest neighbour sort -> rescale to the target
use crate::edges::{extract_edge_points, BitDepth, RgbaView};
use crate::sampling::{dropout, dropout_random, rescale, Dimensions};
use crate::sorting::{sort_by_distance_2d, SortOptions};
use crate::{Error, Point, MAX_COORD};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformConfig {
    /// Edge sensitivity, see [`BitDepth`]
    pub edge_bit_depth: u8,
    /// Fraction of edge points kept, in (0, 1]
    pub dropout: f64,
    /// Keep points at random instead of evenly spaced
    pub random_dropout: bool,
    pub source: Dimensions,
    pub target: Dimensions,
    /// Consecutive output points at least this far apart belong to different strokes
    pub max_distance: f64,
    pub sort: SortOptions,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            edge_bit_depth: 3,
            dropout: 1.0,
            random_dropout: false,
            source: Dimensions::default(),
            target: Dimensions::default(),
            max_distance: 10.0,
            sort: SortOptions::default(),
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> Result<(), Error> {
        self.checked_depth().map(|_| ())
    }

    /// Validate everything, handing back the parsed edge depth.
    fn checked_depth(&self) -> Result<BitDepth, Error> {
        let depth = BitDepth::new(self.edge_bit_depth)?;
        if !(self.dropout > 0.0 && self.dropout <= 1.0) {
            return Err(Error::InvalidDropout(self.dropout));
        }
        validate_dimensions(self.source)?;
        validate_dimensions(self.target)?;
        self.sort.validate()?;
        Ok(depth)
    }
}

fn validate_dimensions(dim: Dimensions) -> Result<(), Error> {
    let max = MAX_COORD as u32;
    if dim.width == 0 || dim.height == 0 || dim.width > max || dim.height > max {
        return Err(Error::InvalidDimensions {
            width: dim.width,
            height: dim.height,
        });
    }
    Ok(())
}

/// Runs the whole pipeline. Owns the random source used for random dropout.
#[derive(Debug, Clone)]
pub struct PointTransform<R = SmallRng> {
    rng: R,
}

impl PointTransform<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> PointTransform<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Turn the image behind `sample` into an ordered point sequence in target coordinates.
    ///
    /// `sample` is called once per source pixel and must return its intensity.
    pub fn transform<F>(
        &mut self,
        config: &TransformConfig,
        sample: F,
    ) -> Result<Vec<Point>, Error>
    where
        F: FnMut(u32, u32) -> u8,
    {
        let depth = config.checked_depth()?;
        let Dimensions { width, height } = config.source;

        let edges = extract_edge_points(sample, width, height, depth);
        let points = if config.random_dropout {
            dropout_random(&edges, config.dropout, &mut self.rng)
        } else {
            dropout(&edges, config.dropout)
        };
        debug!("{} edge points, {} kept", edges.len(), points.len());

        // points are still in source space here
        let (w, h) = (f64::from(width), f64::from(height));
        let sorted = sort_by_distance_2d(&points, w, h, &config.sort)?;
        debug!("sorted {} points", sorted.len());

        Ok(rescale(&sorted, config.source, config.target))
    }

    /// Run [`transform`](Self::transform) for every requested channel of `image` in parallel.
    ///
    /// The source dimensions of `config` are replaced by the image's. Every channel gets its own
    /// generator seeded from this transform's, so a seeded transform gives reproducible results.
    pub fn transform_channels(
        &mut self,
        config: &TransformConfig,
        image: &RgbaView<'_>,
        channels: &[usize],
    ) -> Result<Vec<Vec<Point>>, Error> {
        let config = TransformConfig {
            source: Dimensions::new(image.width(), image.height()),
            ..config.clone()
        };
        let seeds = channels
            .iter()
            .map(|_| self.rng.gen::<u64>())
            .collect::<Vec<_>>();

        channels
            .par_iter()
            .zip(seeds.into_par_iter())
            .map(|(&channel, seed)| {
                let sample = image.channel(channel)?;
                PointTransform::from_seed(seed).transform(&config, sample)
            })
            .collect()
    }
}
