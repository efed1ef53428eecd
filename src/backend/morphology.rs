//! Binary morphology with arbitrary structuring elements.
//!
//! Masks are treated as binary (nonzero = foreground) and results hold only
//! 0 and 255. Neighbours outside the image never contribute: dilation does not
//! grow from them and erosion does not shrink because of them.

use image::{GrayImage, Luma};

/// Offsets (dx, dy) relative to the anchor at the element's centre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    size: u32,
    offsets: Vec<(i32, i32)>,
}

impl StructuringElement {
    /// Discrete ellipse inscribed in a `size`×`size` box.
    ///
    /// Row `i` spans `c - dx ..= c + dx` with
    /// `dx = round(c * sqrt(1 - (i - r)^2 / r^2))`, `r = c = size / 2`.
    pub fn ellipse(size: u32) -> StructuringElement {
        let r = (size / 2) as i32;
        let c = r;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };
        let mut offsets = Vec::new();
        for i in 0..size as i32 {
            let dy = i - r;
            if dy.abs() > r {
                continue;
            }
            let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as i32;
            let j1 = (c - dx).max(0);
            let j2 = (c + dx + 1).min(size as i32);
            for j in j1..j2 {
                offsets.push((j - c, dy));
            }
        }
        StructuringElement { size, offsets }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// Renders the element as a `size`×`size` 0/1 grid, row by row.
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        let mut grid = vec![vec![0u8; self.size as usize]; self.size as usize];
        let c = (self.size / 2) as i32;
        for &(dx, dy) in &self.offsets {
            grid[(dy + c) as usize][(dx + c) as usize] = 1;
        }
        grid
    }
}

pub fn dilate(mask: &GrayImage, element: &StructuringElement, iterations: usize) -> GrayImage {
    let mut current = binarize(mask);
    for _ in 0..iterations {
        current = dilate_once(&current, element);
    }
    current
}

pub fn erode(mask: &GrayImage, element: &StructuringElement, iterations: usize) -> GrayImage {
    let mut current = binarize(mask);
    for _ in 0..iterations {
        current = erode_once(&current, element);
    }
    current
}

/// Dilation repeated `iterations` times followed by as many erosions.
pub fn close(mask: &GrayImage, element: &StructuringElement, iterations: usize) -> GrayImage {
    erode(&dilate(mask, element, iterations), element, iterations)
}

fn binarize(mask: &GrayImage) -> GrayImage {
    let mut out = mask.clone();
    for p in out.pixels_mut() {
        p.0[0] = if p.0[0] > 0 { 255 } else { 0 };
    }
    out
}

fn dilate_once(mask: &GrayImage, element: &StructuringElement) -> GrayImage {
    let (w, h) = mask.dimensions();
    let mut out = GrayImage::new(w, h);
    for (x, y, p) in mask.enumerate_pixels() {
        if p.0[0] == 0 {
            continue;
        }
        for &(dx, dy) in element.offsets() {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx >= 0 && ny >= 0 && (nx as u32) < w && (ny as u32) < h {
                out.put_pixel(nx as u32, ny as u32, Luma([255]));
            }
        }
    }
    out
}

fn erode_once(mask: &GrayImage, element: &StructuringElement) -> GrayImage {
    let (w, h) = mask.dimensions();
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let keep = element.offsets().iter().all(|&(dx, dy)| {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || ny < 0 || nx as u32 >= w || ny as u32 >= h {
                    return true;
                }
                mask.get_pixel(nx as u32, ny as u32).0[0] > 0
            });
            if keep {
                out.put_pixel(x, y, Luma([255]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_by_seven_ellipse_shape() {
        let grid = StructuringElement::ellipse(7).to_grid();
        let expected: Vec<Vec<u8>> = vec![
            vec![0, 0, 0, 1, 0, 0, 0],
            vec![0, 1, 1, 1, 1, 1, 0],
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![0, 1, 1, 1, 1, 1, 0],
            vec![0, 0, 0, 1, 0, 0, 0],
        ];
        assert_eq!(grid, expected);
    }

    #[test]
    fn three_by_three_ellipse_is_a_cross() {
        let grid = StructuringElement::ellipse(3).to_grid();
        assert_eq!(grid, vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn dilate_then_erode_restores_a_single_pixel() {
        let mut mask = GrayImage::new(9, 9);
        mask.put_pixel(4, 4, Luma([255]));
        let cross = StructuringElement::ellipse(3);

        let grown = dilate(&mask, &cross, 1);
        assert_eq!(grown.pixels().filter(|p| p.0[0] == 255).count(), 5);

        let back = erode(&grown, &cross, 1);
        assert_eq!(back, mask);
    }

    #[test]
    fn close_bridges_a_small_gap() {
        let mut mask = GrayImage::new(20, 9);
        for y in 3..6 {
            for x in (2..8).chain(10..18) {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        assert_eq!(mask.get_pixel(8, 4).0[0], 0);
        let closed = close(&mask, &StructuringElement::ellipse(7), 1);
        assert_eq!(closed.get_pixel(8, 4).0[0], 255);
        assert_eq!(closed.get_pixel(9, 4).0[0], 255);
    }

    #[test]
    fn erosion_ignores_the_image_border() {
        let mask = GrayImage::from_pixel(5, 5, Luma([255]));
        let eroded = erode(&mask, &StructuringElement::ellipse(3), 2);
        assert!(eroded.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn empty_mask_stays_empty() {
        let mask = GrayImage::new(6, 6);
        let closed = close(&mask, &StructuringElement::ellipse(7), 2);
        assert!(closed.pixels().all(|p| p.0[0] == 0));
    }
}
