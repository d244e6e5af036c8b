// RGBA color with straight (non-premultiplied) alpha, channels in [0,1].
// Visual: every cell and every marker on the canvas ends up as one of these.

/// Immutable RGBA value. Equality is plain channel equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Fully transparent; what a cell shows when no source reaches it.
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Every channel multiplied by `k`.
    #[inline]
    pub fn scale(self, k: f32) -> Self {
        Self::rgba(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    /// Channel-wise sum (no clamping; used for weighted accumulation).
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self::rgba(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }

    /// Linear mix: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self.scale(1.0 - t).add(other.scale(t))
    }

    /// Composite this color over an opaque backdrop by its alpha.
    #[inline]
    pub fn over(self, backdrop: Self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        let mixed = backdrop.lerp(self, a);
        Self::rgba(mixed.r, mixed.g, mixed.b, 1.0)
    }

    /// Pack as 0x00RRGGBB for minifb (alpha dropped).
    #[inline]
    pub fn to_u32(self) -> u32 {
        let [r, g, b, _] = self.to_rgba8();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Quantize each channel to 0..=255.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        #[inline]
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// The pen colors offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    Orange,
    Blue,
}

impl Swatch {
    pub const ALL: [Swatch; 2] = [Swatch::Orange, Swatch::Blue];

    pub const fn color(self) -> Color {
        match self {
            Swatch::Orange => Color::rgb(1.0, 0.584, 0.0),
            Swatch::Blue => Color::rgb(0.0, 0.478, 1.0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Swatch::Orange => "ORANGE",
            Swatch::Blue => "BLUE",
        }
    }

    /// The swatch whose color is exactly `c`, if any.
    pub fn from_color(c: Color) -> Option<Swatch> {
        Self::ALL.into_iter().find(|s| s.color() == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Color::rgb(1.0, 0.0, 0.0);
        let b = Color::rgb(0.0, 0.0, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6 && (mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn transparent_over_white_stays_white() {
        assert_eq!(Color::TRANSPARENT.over(Color::WHITE).to_u32(), 0x00FF_FFFF);
    }

    #[test]
    fn swatch_lookup_is_exact() {
        assert_eq!(Swatch::from_color(Swatch::Blue.color()), Some(Swatch::Blue));
        assert_eq!(Swatch::from_color(Color::rgb(0.0, 0.478, 0.999)), None);
    }

    #[test]
    fn packs_as_rrggbb() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_u32(), 0x00FF_0000);
        assert_eq!(Color::rgb(0.0, 1.0, 0.0).to_u32(), 0x0000_FF00);
        assert_eq!(Color::rgba(0.0, 0.0, 1.0, 0.2).to_u32(), 0x0000_00FF);
    }
}
