use crate::core::map::TileMap;

/// March increment in world units (1/20th of a cell).
pub const RAY_STEP: f32 = 0.05;

/// Fixed-step ray march from `(ox, oy)` along `a`; returns the Euclidean
/// distance to the first sample that lands in a wall or outside the map.
///
/// Each sample is taken at `k * RAY_STEP` from the origin rather than by
/// accumulating steps, so the error does not grow with distance.
pub fn cast_ray(map: &TileMap, ox: f32, oy: f32, a: f32) -> f32 {
    let (sin, cos) = a.sin_cos();
    let mut k: u32 = 0;
    loop {
        k += 1;
        let d = k as f32 * RAY_STEP;
        let x = ox + cos * d;
        let y = oy + sin * d;
        if map.is_wall(x, y) {
            let dx = x - ox;
            let dy = y - oy;
            return (dx * dx + dy * dy).sqrt();
        }
    }
}
