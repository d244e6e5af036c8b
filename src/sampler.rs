// Field sampler: turns the source set into one blended color per grid cell.
// Visual: this is the soft color wash you see behind the markers.
//
// Cost is O(cells x sources). Cells are independent, so the parallel path
// hands one row per rayon task; both paths run the exact same per-cell math
// and therefore produce bit-identical fields.

use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::kernel;
use crate::session::SessionState;
use crate::sources::{Point, PointSource};
use crate::types::Rect;

/// Validated grid geometry: cell size >= 1, positive canvas extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    cell_size: f32,
    width: f32,
    height: f32,
}

impl GridSpec {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Result<Self> {
        let valid = cell_size >= 1.0
            && width > 0.0
            && height > 0.0
            && cell_size.is_finite()
            && width.is_finite()
            && height.is_finite();
        if !valid {
            return Err(Error::InvalidGrid { cell_size, width, height });
        }
        Ok(Self { cell_size, width, height })
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Cells along x: starts 0, step, 2*step, ... while start < width.
    pub fn columns(&self) -> usize {
        (self.width / self.cell_size).ceil() as usize
    }

    /// Cells along y, same half-open stride as `columns`.
    pub fn rows(&self) -> usize {
        (self.height / self.cell_size).ceil() as usize
    }

    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Top-left corner of a cell; also the point the kernel is sampled at.
    #[inline]
    pub fn cell_origin(&self, col: usize, row: usize) -> Point {
        Point::new(col as f32 * self.cell_size, row as f32 * self.cell_size)
    }

    /// Drawn rectangle of a cell. The last column/row is NOT clipped to the
    /// canvas: with width 105 and step 20 the last cell spans 100..120.
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        let o = self.cell_origin(col, row);
        Rect {
            x: o.x,
            y: o.y,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    pub fn radius(&self) -> f32 {
        kernel::field_radius(self.width)
    }
}

/// One render pass: a row-major grid of blended colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    grid: GridSpec,
    colors: Vec<Color>,
}

impl Field {
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        if col >= self.columns() || row >= self.rows() {
            return None;
        }
        self.colors.get(row * self.columns() + col).copied()
    }

    /// Row-major colors, `columns() * rows()` long.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Every cell with its drawn rectangle, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        let cols = self.columns();
        self.colors.iter().enumerate().map(move |(i, c)| {
            (self.grid.cell_rect(i % cols, i / cols), *c)
        })
    }
}

/// Blend every source reaching `at`.
/// No reach at all gives a transparent cell rather than a black one.
#[inline]
pub fn sample(at: Point, sources: &[PointSource], radius: f32) -> Color {
    let mut acc = Color::TRANSPARENT;
    let mut total = 0.0_f32;
    for s in sources {
        let w = kernel::weight(at, s.position, radius);
        if w > 0.0 {
            acc = acc.add(s.color.scale(w));
            total += w;
        }
    }
    if total == 0.0 {
        return Color::TRANSPARENT;
    }
    acc.scale(1.0 / total)
}

#[inline]
fn fill_row(grid: &GridSpec, row: usize, out: &mut [Color], sources: &[PointSource], radius: f32) {
    for (col, cell) in out.iter_mut().enumerate() {
        *cell = sample(grid.cell_origin(col, row), sources, radius);
    }
}

/// Reference single-threaded render.
pub fn render(grid: &GridSpec, sources: &[PointSource]) -> Field {
    let cols = grid.columns();
    let radius = grid.radius();
    let mut colors = vec![Color::TRANSPARENT; grid.cell_count()];
    if cols > 0 {
        for (row, out) in colors.chunks_mut(cols).enumerate() {
            fill_row(grid, row, out, sources, radius);
        }
    }
    Field { grid: *grid, colors }
}

/// Same result as `render`, rows spread over the rayon pool.
/// `sources` is borrowed for the whole pass, so it cannot change mid-render.
pub fn render_parallel(grid: &GridSpec, sources: &[PointSource]) -> Field {
    let cols = grid.columns();
    let radius = grid.radius();
    let mut colors = vec![Color::TRANSPARENT; grid.cell_count()];
    if cols > 0 {
        colors
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| fill_row(grid, row, out, sources, radius));
    }
    Field { grid: *grid, colors }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Serial,
    Parallel,
}

/// Holds the last rendered field and the session generation it belongs to.
/// Visual: lets the window redraw every frame without recomputing the wash
/// unless a source, the resolution or the canvas size actually changed.
pub struct FieldCache {
    mode: RenderMode,
    field: Option<Field>,
    rendered_generation: Option<u64>,
}

impl FieldCache {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            field: None,
            rendered_generation: None,
        }
    }

    pub fn is_stale(&self, session: &SessionState) -> bool {
        self.rendered_generation != Some(session.generation())
    }

    /// Re-render if the session moved on since the last pass.
    /// Returns true when a new field was produced.
    pub fn refresh(&mut self, session: &SessionState) -> bool {
        if !self.is_stale(session) {
            return false;
        }
        let grid = session.grid();
        let sources = session.sources().as_slice();
        let started = Instant::now();
        let field = match self.mode {
            RenderMode::Serial => render(&grid, sources),
            RenderMode::Parallel => render_parallel(&grid, sources),
        };
        debug!(
            cells = field.colors.len(),
            sources = sources.len(),
            generation = session.generation(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "field rendered"
        );
        self.field = Some(field);
        self.rendered_generation = Some(session.generation());
        true
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }
}
