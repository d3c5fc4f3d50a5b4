use image::Rgb;

pub trait Painter {
    fn color(&self, count: u16) -> Rgb<u8>;
}

fn channel(v: u32) -> u8 {
    v.min(255) as u8
}

/// Red ramps ten times faster than green and blue, giving a dark to orange
/// gradient by escape speed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ember;

impl Painter for Ember {
    fn color(&self, count: u16) -> Rgb<u8> {
        let n = count as u32;
        Rgb([channel(n * 10), channel(n), channel(n)])
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Greyscale {
    max_count: f64,
}

impl Greyscale {
    pub fn new(max_count: u16) -> Self {
        Self {
            max_count: max_count.max(1) as f64,
        }
    }
}

impl Painter for Greyscale {
    fn color(&self, count: u16) -> Rgb<u8> {
        let frac = (count as f64 / self.max_count).clamp(0.0, 1.0);
        let v = (frac * 255.0).round() as u8;
        Rgb([v, v, v])
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Palette {
    Ember(Ember),
    Greyscale(Greyscale),
}

impl Painter for Palette {
    fn color(&self, count: u16) -> Rgb<u8> {
        match self {
            Self::Ember(p) => p.color(count),
            Self::Greyscale(p) => p.color(count),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::Ember(Ember)
    }
}
