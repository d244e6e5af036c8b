// PNG snapshot of a rendered field.
// Visual: the file looks like the canvas without markers, with transparent
// cells left transparent. One-way: nothing is ever loaded back.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::info;

use crate::error::Result;
use crate::sampler::Field;

/// Rasterize the field over the canvas bounds (cells clipped to the canvas).
pub fn field_to_image(field: &Field) -> RgbaImage {
    let grid = field.grid();
    let w = grid.width().ceil() as u32;
    let h = grid.height().ceil() as u32;
    let step = grid.cell_size();
    RgbaImage::from_fn(w, h, |x, y| {
        let col = (x as f32 / step) as usize;
        let row = (y as f32 / step) as usize;
        let c = field.get(col, row).unwrap_or_default();
        Rgba(c.to_rgba8())
    })
}

pub fn save_png(field: &Field, path: &Path) -> Result<()> {
    let img = field_to_image(field);
    img.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "field exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Swatch;
    use crate::sampler::{GridSpec, render};
    use crate::sources::{Point, SourceSet};

    #[test]
    fn image_matches_canvas_and_cells() {
        let grid = GridSpec::new(20.0, 105.0, 100.0).unwrap();
        let mut set = SourceSet::new();
        set.push(Point::new(0.0, 0.0), Swatch::Orange.color());
        let field = render(&grid, set.as_slice());
        let img = field_to_image(&field);
        assert_eq!(img.dimensions(), (105, 100));
        assert_eq!(img.get_pixel(5, 5).0, Swatch::Orange.color().to_rgba8());
        // far corner is out of reach (radius 52.5)
        assert_eq!(img.get_pixel(104, 99).0[3], 0);
    }

    #[test]
    fn writes_a_png() {
        let grid = GridSpec::new(10.0, 100.0, 100.0).unwrap();
        let field = render(&grid, &[]);
        let path = std::env::temp_dir().join(format!("color-field-test-{}.png", std::process::id()));
        save_png(&field, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let _ = std::fs::remove_file(&path);
    }
}
