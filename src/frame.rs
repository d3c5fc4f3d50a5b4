use image::{Rgb, RgbImage};

use crate::threads::Join;

pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: Rgb<u8>,
}

impl Pixel {
    pub fn new(x: u32, y: u32, color: Rgb<u8>) -> Self {
        Self { x, y, color }
    }
}

/// Pixels from one render pass, in no particular order. Grid cells without
/// a pixel are background.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pixels: Vec<Pixel>,
    samples: usize,
    evaluated: usize,
}

impl Frame {
    pub fn new(pixels: Vec<Pixel>, samples: usize, evaluated: usize) -> Self {
        Self {
            pixels,
            samples,
            evaluated,
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Grid samples enumerated for this frame.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Grid samples that were handed to a worker.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    pub(crate) fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Paints the frame onto a black `width` x `height` image. Pixels outside
    /// the image are skipped.
    pub fn to_image(&self, width: u32, height: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
        for p in &self.pixels {
            if p.x < width && p.y < height {
                img.put_pixel(p.x, p.y, p.color);
            }
        }
        img
    }
}

impl Join for Frame {
    fn join_vec(parts: Vec<Self>) -> Self {
        let samples = parts.iter().map(|f| f.samples).sum();
        let evaluated = parts.iter().map(|f| f.evaluated).sum();
        let pixels = Vec::join_vec(parts.into_iter().map(|f| f.pixels).collect());
        Self {
            pixels,
            samples,
            evaluated,
        }
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}
