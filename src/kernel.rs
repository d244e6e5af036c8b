// Linear distance falloff deciding how strongly a source colors a cell.
// Visual: a source paints at full strength on top of itself and fades out
// to nothing half a canvas width away.

use crate::sources::Point;

/// Influence radius for a canvas: half its width.
/// Height is deliberately ignored; a tall narrow canvas still uses width / 2.
#[inline]
pub fn field_radius(canvas_width: f32) -> f32 {
    canvas_width / 2.0
}

/// Weight in [0, 1]: 1 at distance 0, falling linearly to 0 at `radius` and beyond.
/// A non-positive radius has no meaningful falloff and yields 0.
#[inline]
pub fn weight(sample: Point, source: Point, radius: f32) -> f32 {
    debug_assert!(radius > 0.0, "kernel radius must be positive, got {radius}");
    if radius <= 0.0 {
        return 0.0;
    }
    let d = sample.distance(source);
    (radius - d).max(0.0) / radius
}
