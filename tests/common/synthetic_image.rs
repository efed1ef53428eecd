use image::{GrayImage, Rgb, RgbImage};

pub fn uniform(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Draws a horizontal bar covering `x0..x1` and `y..y + thickness`, clipped
/// to the image.
pub fn draw_bar(img: &mut RgbImage, x0: u32, x1: u32, y: u32, thickness: u32, color: [u8; 3]) {
    let (w, h) = img.dimensions();
    for yy in y..(y + thickness).min(h) {
        for x in x0..x1.min(w) {
            img.put_pixel(x, yy, Rgb(color));
        }
    }
}

/// Gray background with a few dark scratches of different lengths, used for
/// dimension and subset checks.
pub fn scratched(width: u32, height: u32) -> RgbImage {
    let mut img = uniform(width, height, 180);
    draw_bar(&mut img, width / 20, width.min(120), height / 10, 3, [20, 20, 20]);
    draw_bar(&mut img, width / 2, width.saturating_sub(5), height / 2, 2, [40, 30, 30]);
    draw_bar(&mut img, 1, 8, height.saturating_sub(4), 1, [0, 0, 0]);
    img
}

pub fn count_set(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] > 0).count()
}
