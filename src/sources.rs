// The placed point sources, in placement order.
// Visual: each entry becomes one marker dot and one blob of influence on the canvas.

use crate::color::{Color, Swatch};

/// Opaque unique id handed out once per placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Canvas-space position in pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One placed source. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSource {
    pub id: SourceId,
    pub position: Point,
    pub color: Color,
}

/// Append-only set of sources; ids are never reused, not even after `clear`.
#[derive(Debug, Default, Clone)]
pub struct SourceSet {
    sources: Vec<PointSource>,
    next_id: u64,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new source and return its fresh id.
    /// Duplicate positions are fine; they simply stack influence.
    pub fn push(&mut self, position: Point, color: Color) -> SourceId {
        let id = SourceId(self.next_id);
        self.next_id += 1;
        self.sources.push(PointSource { id, position, color });
        id
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn get(&self, id: SourceId) -> Option<&PointSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointSource> {
        self.sources.iter()
    }

    /// Contiguous view used by the sampler's hot loop.
    pub fn as_slice(&self) -> &[PointSource] {
        &self.sources
    }

    /// How many sources carry exactly `color`.
    pub fn count_color(&self, color: Color) -> usize {
        self.sources.iter().filter(|s| s.color == color).count()
    }

    pub fn count_swatch(&self, swatch: Swatch) -> usize {
        self.count_color(swatch.color())
    }

    /// Share of sources carrying `swatch`; 0 for an empty set.
    pub fn swatch_ratio(&self, swatch: Swatch) -> f32 {
        if self.sources.is_empty() {
            return 0.0;
        }
        self.count_swatch(swatch) as f32 / self.sources.len() as f32
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a PointSource;
    type IntoIter = std::slice::Iter<'a, PointSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_order_is_kept() {
        let mut set = SourceSet::new();
        let a = set.push(Point::new(1.0, 1.0), Swatch::Orange.color());
        let b = set.push(Point::new(1.0, 1.0), Swatch::Orange.color());
        set.clear();
        let c = set.push(Point::new(5.0, 5.0), Swatch::Blue.color());
        let ids: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(c).map(|s| s.position), Some(Point::new(5.0, 5.0)));
        assert!(set.get(a).is_none());
    }

    #[test]
    fn ratios_follow_counts() {
        let mut set = SourceSet::new();
        assert_eq!(set.swatch_ratio(Swatch::Orange), 0.0);
        assert_eq!(set.swatch_ratio(Swatch::Blue), 0.0);

        set.push(Point::new(0.0, 0.0), Swatch::Orange.color());
        set.push(Point::new(10.0, 0.0), Swatch::Orange.color());
        set.push(Point::new(20.0, 0.0), Swatch::Blue.color());
        assert_eq!(set.count_swatch(Swatch::Orange), 2);
        assert!((set.swatch_ratio(Swatch::Orange) - 2.0 / 3.0).abs() < 1e-6);
        assert!((set.swatch_ratio(Swatch::Blue) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn off_palette_colors_count_toward_neither_swatch() {
        let mut set = SourceSet::new();
        set.push(Point::new(0.0, 0.0), Color::rgb(0.2, 0.9, 0.2));
        set.push(Point::new(0.0, 0.0), Swatch::Blue.color());
        assert_eq!(set.swatch_ratio(Swatch::Orange), 0.0);
        assert!((set.swatch_ratio(Swatch::Blue) - 0.5).abs() < 1e-6);
    }
}
