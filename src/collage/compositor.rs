/// The fixed-size collage surface and the top/bottom compositing routine
///
/// Two images share a 288x288 canvas: image 0 fills the top half, image 1
/// the bottom half, each stretched to fit exactly (aspect ratio ignored).
/// White 4px strips frame each half. The seam between the halves carries a
/// single strip (the top half's bottom edge); the bottom half gets no top
/// strip of its own.

use image::{imageops, DynamicImage, Rgba, RgbaImage};

/// Edge length of the square collage canvas in pixels
pub const SURFACE_SIZE: u32 = 288;

/// Height of one image half
pub const HALF_HEIGHT: u32 = SURFACE_SIZE / 2;

/// Width of the white framing strips
pub const FRAME_WIDTH: u32 = 4;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The raster target for one render pass.
///
/// A fresh surface is fully cleared (every pixel transparent black).
/// `draw_top` and `draw_bottom` each touch only their own half, so the
/// final pixels are the same no matter which is called first.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Create a cleared surface
    pub fn new() -> Self {
        Surface {
            pixels: RgbaImage::new(SURFACE_SIZE, SURFACE_SIZE),
        }
    }

    /// Stretch-draw `img` into the top half and frame it on all four edges
    pub fn draw_top(&mut self, img: &DynamicImage) {
        self.stretch_draw(img, 0);

        self.fill_rect(0, 0, FRAME_WIDTH, HALF_HEIGHT); // Left
        self.fill_rect(SURFACE_SIZE - FRAME_WIDTH, 0, FRAME_WIDTH, HALF_HEIGHT); // Right
        self.fill_rect(0, 0, SURFACE_SIZE, FRAME_WIDTH); // Top
        self.fill_rect(0, HALF_HEIGHT - FRAME_WIDTH, SURFACE_SIZE, FRAME_WIDTH); // Bottom
    }

    /// Stretch-draw `img` into the bottom half and frame it on three edges
    pub fn draw_bottom(&mut self, img: &DynamicImage) {
        self.stretch_draw(img, HALF_HEIGHT);

        self.fill_rect(0, HALF_HEIGHT, FRAME_WIDTH, HALF_HEIGHT); // Left
        self.fill_rect(SURFACE_SIZE - FRAME_WIDTH, HALF_HEIGHT, FRAME_WIDTH, HALF_HEIGHT); // Right
        self.fill_rect(0, SURFACE_SIZE - FRAME_WIDTH, SURFACE_SIZE, FRAME_WIDTH); // Bottom
    }

    /// Resize `img` to exactly 288x144 and blit it at vertical offset `y`
    fn stretch_draw(&mut self, img: &DynamicImage, y: u32) {
        let scaled = imageops::resize(
            &img.to_rgba8(),
            SURFACE_SIZE,
            HALF_HEIGHT,
            imageops::FilterType::Triangle,
        );
        imageops::replace(&mut self.pixels, &scaled, 0, i64::from(y));
    }

    /// Fill a rectangle with the frame color
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for py in y..y + h {
            for px in x..x + w {
                self.pixels.put_pixel(px, py, WHITE);
            }
        }
    }

    /// Read a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Borrow the backing raster, e.g. for PNG encoding
    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the surface into raw RGBA bytes for the on-screen preview
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels.into_raw()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}
