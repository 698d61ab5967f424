//! Edge point extraction from a grayscale field.
use crate::{Error, Point};
use std::mem;

const COLOR_BIT_DEPTH: u8 = 8;

/// Number of intensity bits kept before neighbours are compared.
///
/// Lower depths merge more intensities into one bucket and so detect fewer edges. A depth of 8
/// compares raw intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    pub fn new(depth: u8) -> Result<Self, Error> {
        if depth == 0 || depth > COLOR_BIT_DEPTH {
            return Err(Error::InvalidBitDepth(depth));
        }
        Ok(Self(depth))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Floor `value` to its bucket
    #[inline]
    pub fn quantize(self, value: u8) -> u8 {
        let loss = 1u16 << (COLOR_BIT_DEPTH - self.0);
        ((u16::from(value) / loss) * loss) as u8
    }
}

/// Return every pixel whose quantized intensity differs from the one above, to the left or
/// above-left of it, in raster order.
///
/// Row 0 and column 0 are never reported. Only two rows of quantized values are kept alive.
pub fn extract_edge_points<F>(
    mut sample: F,
    width: u32,
    height: u32,
    depth: BitDepth,
) -> Vec<Point>
where
    F: FnMut(u32, u32) -> u8,
{
    let mut prev = vec![0u8; width as usize];
    let mut current = vec![0u8; width as usize];
    let mut edges = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let g0 = depth.quantize(sample(x, y));
            let xi = x as usize;
            current[xi] = g0;
            if x == 0 || y == 0 {
                continue;
            }
            let gt = prev[xi];
            let gl = current[xi - 1];
            let gtl = prev[xi - 1];
            if g0 != gt || g0 != gl || g0 != gtl {
                edges.push(Point::new(x as i32, y as i32));
            }
        }
        mem::swap(&mut prev, &mut current);
    }
    edges
}

/// Borrowed row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct RgbaView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> RgbaView<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, Error> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sampler over a single channel, 0..4 for r, g, b, a
    pub fn channel(&self, channel: usize) -> Result<impl Fn(u32, u32) -> u8 + 'a, Error> {
        if channel >= 4 {
            return Err(Error::InvalidChannel(channel));
        }
        let data = self.data;
        let width = self.width as usize;
        Ok(move |x: u32, y: u32| data[(x as usize + y as usize * width) * 4 + channel])
    }
}
