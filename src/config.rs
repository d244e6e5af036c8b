// Startup options and the slider ranges every setter is held to.
// Nothing here is persisted; the command line is read once at launch.

use clap::{Parser, ValueEnum};

use crate::color::Swatch;

/// Inclusive range with a step, like a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Bounds {
    /// Snap to the nearest step (measured from `min`), then clamp into range.
    pub fn clamp(&self, value: u32) -> u32 {
        let v = value.clamp(self.min, self.max);
        let offset = v - self.min;
        let snapped = self.min + ((offset + self.step / 2) / self.step) * self.step;
        snapped.min(self.max)
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max && (value - self.min) % self.step == 0
    }
}

pub const CELL_SIZE: Bounds = Bounds { min: 1, max: 20, step: 1 };
pub const CANVAS_WIDTH: Bounds = Bounds { min: 100, max: 500, step: 10 };
pub const CANVAS_HEIGHT: Bounds = Bounds { min: 100, max: 500, step: 10 };

pub const DEFAULT_CELL_SIZE: u32 = 10;
pub const DEFAULT_CANVAS_WIDTH: u32 = 300;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pen {
    Orange,
    Blue,
}

impl From<Pen> for Swatch {
    fn from(p: Pen) -> Self {
        match p {
            Pen::Orange => Swatch::Orange,
            Pen::Blue => Swatch::Blue,
        }
    }
}

/// Interactive color field: click to drop colored sources and watch them blend.
#[derive(Debug, Clone, Parser)]
#[command(name = "color-field", version, about)]
pub struct Args {
    /// Cell size in pixels (1-20); smaller is sharper and slower
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Canvas width in pixels (100-500, step 10)
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels (100-500, step 10)
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub height: u32,

    /// Initial pen color
    #[arg(long, value_enum, default_value_t = Pen::Orange)]
    pub pen: Pen,

    /// Render the field on one thread instead of the rayon pool
    #[arg(long)]
    pub serial: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_snaps_and_bounds() {
        assert_eq!(CANVAS_WIDTH.clamp(0), 100);
        assert_eq!(CANVAS_WIDTH.clamp(9000), 500);
        assert_eq!(CANVAS_WIDTH.clamp(104), 100);
        assert_eq!(CANVAS_WIDTH.clamp(105), 110);
        assert_eq!(CANVAS_WIDTH.clamp(250), 250);
        assert_eq!(CELL_SIZE.clamp(0), 1);
        assert_eq!(CELL_SIZE.clamp(21), 20);
        assert_eq!(CELL_SIZE.clamp(7), 7);
    }

    #[test]
    fn contains_respects_step() {
        assert!(CANVAS_HEIGHT.contains(120));
        assert!(!CANVAS_HEIGHT.contains(125));
        assert!(!CANVAS_HEIGHT.contains(90));
    }

    #[test]
    fn args_defaults_parse() {
        let args = Args::parse_from(["color-field"]);
        assert_eq!(args.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(args.pen, Pen::Orange);
        assert!(!args.serial);

        let args = Args::parse_from(["color-field", "--width", "420", "--pen", "blue", "--serial"]);
        assert_eq!(args.width, 420);
        assert_eq!(Swatch::from(args.pen), Swatch::Blue);
        assert!(args.serial);
    }
}
