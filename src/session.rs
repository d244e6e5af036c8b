// Session state: the one place all mutation goes through.
// Visual: every click, key and resize lands here first; the window then asks
// for a fresh field if the generation moved.

use tracing::{info, warn};

use crate::color::{Color, Swatch};
use crate::config::{self, Bounds};
use crate::sampler::GridSpec;
use crate::signal::{Observers, SubscriptionId};
use crate::sources::{Point, SourceId, SourceSet};

/// What changed, delivered to subscribers after the mutation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    SourcePlaced(SourceId),
    CellSizeChanged(u32),
    CanvasResized { width: u32, height: u32 },
    ActiveColorChanged(Color),
    Reset,
}

/// Per-swatch numbers for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchStat {
    pub swatch: Swatch,
    pub count: usize,
    pub ratio: f32,
}

pub struct SessionState {
    sources: SourceSet,
    cell_size: u32,
    canvas_width: u32,
    canvas_height: u32,
    active_color: Color,
    generation: u64, // bumped on every invalidating change
    observers: Observers<SessionEvent>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(
            config::DEFAULT_CELL_SIZE,
            config::DEFAULT_CANVAS_WIDTH,
            config::DEFAULT_CANVAS_HEIGHT,
            Swatch::Orange.color(),
        )
    }
}

impl SessionState {
    /// Out-of-range values are clamped exactly like the setters do.
    pub fn new(cell_size: u32, canvas_width: u32, canvas_height: u32, pen: Color) -> Self {
        Self {
            sources: SourceSet::new(),
            cell_size: bounded("cell size", config::CELL_SIZE, cell_size),
            canvas_width: bounded("canvas width", config::CANVAS_WIDTH, canvas_width),
            canvas_height: bounded("canvas height", config::CANVAS_HEIGHT, canvas_height),
            active_color: pen,
            generation: 0,
            observers: Observers::new(),
        }
    }

    /* ---------- input boundary ---------- */

    /// Drop a new source at `position` with `color`. No dedup, no limit, no clamping.
    pub fn place_point(&mut self, position: Point, color: Color) -> SourceId {
        let id = self.sources.push(position, color);
        info!(id = id.raw(), x = position.x, y = position.y, total = self.sources.len(), "source placed");
        self.invalidate(SessionEvent::SourcePlaced(id));
        id
    }

    /// Place with the active pen color.
    pub fn place_with_pen(&mut self, position: Point) -> SourceId {
        self.place_point(position, self.active_color)
    }

    /// Drop every source. Ids keep counting up.
    pub fn reset(&mut self) {
        self.sources.clear();
        info!("sources cleared");
        self.invalidate(SessionEvent::Reset);
    }

    /* ---------- config boundary ---------- */

    /// Returns the applied (clamped) value.
    pub fn set_cell_size(&mut self, v: u32) -> u32 {
        let v = bounded("cell size", config::CELL_SIZE, v);
        if v != self.cell_size {
            self.cell_size = v;
            self.invalidate(SessionEvent::CellSizeChanged(v));
        }
        v
    }

    pub fn set_canvas_width(&mut self, v: u32) -> u32 {
        let v = bounded("canvas width", config::CANVAS_WIDTH, v);
        if v != self.canvas_width {
            self.canvas_width = v;
            let event = self.resized();
            self.invalidate(event);
        }
        v
    }

    pub fn set_canvas_height(&mut self, v: u32) -> u32 {
        let v = bounded("canvas height", config::CANVAS_HEIGHT, v);
        if v != self.canvas_height {
            self.canvas_height = v;
            let event = self.resized();
            self.invalidate(event);
        }
        v
    }

    /// Affects only the next placement; the field stays valid.
    pub fn set_active_color(&mut self, c: Color) {
        if c == self.active_color {
            return;
        }
        self.active_color = c;
        self.observers.notify(&SessionEvent::ActiveColorChanged(c));
    }

    /* ---------- read side ---------- */

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Grid for the next render. Always valid: every stored value is clamped
    /// into ranges whose minimums are positive.
    pub fn grid(&self) -> GridSpec {
        match GridSpec::new(
            self.cell_size as f32,
            self.canvas_width as f32,
            self.canvas_height as f32,
        ) {
            Ok(grid) => grid,
            Err(e) => unreachable!("bounded setters produced an invalid grid: {e}"),
        }
    }

    pub fn swatch_count(&self, swatch: Swatch) -> usize {
        self.sources.count_swatch(swatch)
    }

    /// 0 when there are no sources.
    pub fn swatch_ratio(&self, swatch: Swatch) -> f32 {
        self.sources.swatch_ratio(swatch)
    }

    pub fn palette_stats(&self) -> [SwatchStat; 2] {
        Swatch::ALL.map(|swatch| SwatchStat {
            swatch,
            count: self.swatch_count(swatch),
            ratio: self.swatch_ratio(swatch),
        })
    }

    /* ---------- notifications ---------- */

    pub fn subscribe(&mut self, f: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn resized(&self) -> SessionEvent {
        SessionEvent::CanvasResized {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    fn invalidate(&mut self, event: SessionEvent) {
        self.generation += 1;
        self.observers.notify(&event);
    }
}

fn bounded(what: &str, bounds: Bounds, requested: u32) -> u32 {
    let v = bounds.clamp(requested);
    if v != requested {
        warn!(requested, applied = v, min = bounds.min, max = bounds.max, "{what} out of range, clamped");
    }
    v
}
