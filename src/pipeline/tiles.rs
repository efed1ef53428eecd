/// A patch rectangle in image coordinates. Tiles on the right and bottom
/// edges are clipped to the image and may be smaller than the patch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Non-overlapping tiles covering a `width`×`height` image in row-major
/// order with stride `patch_size`.
pub fn tiles(width: u32, height: u32, patch_size: u32) -> impl Iterator<Item = Tile> {
    let step = patch_size.max(1) as usize;
    (0..height).step_by(step).flat_map(move |y| {
        (0..width).step_by(step).map(move |x| Tile {
            x,
            y,
            width: patch_size.min(width - x),
            height: patch_size.min(height - y),
        })
    })
}
