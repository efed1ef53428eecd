use std::collections::VecDeque;

use image::{GrayImage, Luma};

/// Promotes every background region that cannot reach the image border
/// through 4-connected background pixels to foreground (255).
pub fn fill_holes(mask: &GrayImage) -> GrayImage {
    let (w, h) = mask.dimensions();
    let idx = |x: u32, y: u32| (y as usize) * (w as usize) + x as usize;
    let mut outside = vec![false; (w as usize) * (h as usize)];
    let mut queue = VecDeque::new();

    let seed = |x: u32, y: u32, outside: &mut [bool], queue: &mut VecDeque<(u32, u32)>| {
        if mask.get_pixel(x, y).0[0] == 0 && !outside[idx(x, y)] {
            outside[idx(x, y)] = true;
            queue.push_back((x, y));
        }
    };

    for x in 0..w {
        seed(x, 0, &mut outside, &mut queue);
        if h > 1 {
            seed(x, h - 1, &mut outside, &mut queue);
        }
    }
    for y in 0..h {
        seed(0, y, &mut outside, &mut queue);
        if w > 1 {
            seed(w - 1, y, &mut outside, &mut queue);
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbours {
            if nx < w && ny < h {
                seed(nx, ny, &mut outside, &mut queue);
            }
        }
    }

    let mut out = GrayImage::new(w, h);
    for (x, y, p) in out.enumerate_pixels_mut() {
        if !outside[idx(x, y)] {
            *p = Luma([255]);
        }
    }
    out
}
