use std::ops::Range;

use image::{DynamicImage, ImageBuffer, Rgba};

/// Backing storage for a [`PixelGrid`]: RGBA with 16 bits per channel.
pub type Rgba16Buffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Addressable area of a grid. `min` is inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub fn columns(&self) -> Range<u32> {
        self.min_x..self.max_x
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// Read-only view over decoded image data.
///
/// Every coordinate inside [`PixelGrid::bounds`] yields three 16-bit color
/// channels premultiplied by alpha, so transparent regions sample as black.
/// Alpha stays in the buffer for resampling but sampling ignores it.
#[derive(Clone, Debug)]
pub struct PixelGrid {
    buffer: Rgba16Buffer,
}

impl PixelGrid {
    pub fn new(buffer: Rgba16Buffer) -> Self {
        Self { buffer }
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let mut buffer = image.into_rgba16();
        for pixel in buffer.pixels_mut() {
            premultiply(pixel);
        }
        Self::new(buffer)
    }

    /// Build an opaque grid from a per-pixel RGB callback.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u16; 3],
    {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            let [r, g, b] = f(x, y);
            Rgba([r, g, b, u16::MAX])
        });
        Self::new(buffer)
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds { min_x: 0, min_y: 0, max_x: self.width(), max_y: self.height() }
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Color channels at `(x, y)`. Panics when the point lies outside the bounds.
    pub fn rgb(&self, x: u32, y: u32) -> [u16; 3] {
        let Rgba([r, g, b, _]) = *self.buffer.get_pixel(x, y);
        [r, g, b]
    }

    pub(crate) fn buffer(&self) -> &Rgba16Buffer {
        &self.buffer
    }
}

fn premultiply(pixel: &mut Rgba<u16>) {
    let alpha = u32::from(pixel[3]);
    for channel in &mut pixel.0[..3] {
        *channel = (u32::from(*channel) * alpha / u32::from(u16::MAX)) as u16;
    }
}
