// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the blended color field with a marker per source.
// 2) A crosshair in the pen color that follows your mouse.
// 3) A tiny 5x7 bitmap font to render HUD text under the canvas.

use crate::color::{Color, Swatch};
use crate::error::Error;
use crate::sampler::Field;
use crate::session::SessionState;
use crate::sources::{Point, SourceSet};
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Gap between the window edge and the canvas.
pub const PAD: usize = 10;
/// Largest canvas the sliders allow.
pub const CANVAS_MAX: usize = 500;
/// Room under the canvas for the HUD lines.
pub const HUD_HEIGHT: usize = 48;
pub const WINDOW_WIDTH: usize = PAD + CANVAS_MAX + PAD;
pub const WINDOW_HEIGHT: usize = PAD + CANVAS_MAX + PAD + HUD_HEIGHT;

/// What an empty (transparent) canvas looks like.
pub const BACKGROUND: Color = Color::WHITE;
/// Window area around the canvas.
pub const WINDOW_BG: Color = Color::rgb(0.9, 0.9, 0.9);
pub const INK: Color = Color::rgb(0.15, 0.15, 0.15);
pub const MARKER_RADIUS: i32 = 5;

pub struct Drawer {
    window: Window,       // the on-screen window you see
    mouse_was_down: bool, // left button state last frame
    press_on_canvas: bool,
}

impl Drawer {
    /// Create the window at its fixed size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str) -> Result<Self, Error> {
        let mut window = Window::new(title, WINDOW_WIDTH, WINDOW_HEIGHT, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, mouse_was_down: false, press_on_canvas: false })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, None when the cursor is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Pressed with key repeat, for stepping sliders by holding a key.
    pub fn pressed_repeat(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::Yes)
    }

    /// Call once per frame. Yields the canvas-local release point when a left
    /// click that started on the canvas is let go on the canvas.
    /// Visual: a new marker appears where you let go.
    pub fn poll_release(&mut self, canvas_w: u32, canvas_h: u32) -> Option<Point> {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let at = self.mouse_pos().and_then(|(x, y)| to_canvas(x, y, canvas_w, canvas_h));

        let mut released = None;
        if down && !self.mouse_was_down {
            self.press_on_canvas = at.is_some();
        } else if !down && self.mouse_was_down {
            if self.press_on_canvas {
                released = at;
            }
            self.press_on_canvas = false;
        }
        self.mouse_was_down = down;
        released
    }
}

/// Window pixel -> canvas-local point, if it lands inside [0,w) x [0,h).
pub fn to_canvas(x: f32, y: f32, canvas_w: u32, canvas_h: u32) -> Option<Point> {
    let cx = x - PAD as f32;
    let cy = y - PAD as f32;
    if cx < 0.0 || cy < 0.0 || cx >= canvas_w as f32 || cy >= canvas_h as f32 {
        return None;
    }
    Some(Point::new(cx, cy))
}

/* ---------- Scene: field cells, canvas frame, source markers ---------- */

/// Draw one rendered field plus its markers with the canvas at (ox, oy).
/// Visual: the color wash, a thin frame around the canvas and a dot per source.
pub fn draw_scene(fb: &mut FrameBuffer, ox: i32, oy: i32, field: &Field, sources: &SourceSet) {
    // Cells: composited over the background; the last row/column may spill
    // past the canvas edge, only the window bounds clip it.
    for (rect, color) in field.cells() {
        let x0 = ox + rect.x.floor() as i32;
        let y0 = oy + rect.y.floor() as i32;
        let x1 = ox + rect.right().ceil() as i32;
        let y1 = oy + rect.bottom().ceil() as i32;
        fill_rect(fb, x0, y0, x1, y1, color.over(BACKGROUND).to_u32());
    }

    let grid = field.grid();
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    draw_frame(fb, ox - 1, oy - 1, ox + w, oy + h, INK.to_u32());

    for s in sources {
        let cx = ox + s.position.x.round() as i32;
        let cy = oy + s.position.y.round() as i32;
        draw_disc(fb, cx, cy, MARKER_RADIUS + 1, Color::WHITE.to_u32());
        draw_disc(fb, cx, cy, MARKER_RADIUS, s.color.over(BACKGROUND).to_u32());
    }
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Fill the half-open rectangle [x0,x1) x [y0,y1), clipped to the buffer.
pub fn fill_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let x0 = x0.max(0) as usize;
    let y0 = y0.max(0) as usize;
    let x1 = (x1.max(0) as usize).min(fb.width);
    let y1 = (y1.max(0) as usize).min(fb.height);
    if x0 >= x1 {
        return;
    }
    for y in y0..y1 {
        let row = y * fb.width;
        fb.pixels[row + x0..row + x1].fill(color);
    }
}

/// Filled circle. Visual: a source marker.
pub fn draw_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// 1-pixel rectangle outline through the four corners.
pub fn draw_frame(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x1, y0, x1, y1, color);
    draw_line(fb, x1, y1, x0, y1, color);
    draw_line(fb, x0, y1, x0, y0, color);
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" in the pen color follows your mouse over the canvas.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- HUD ---------- */

/// The three HUD lines: live numbers, palette shares, key help.
pub fn hud_lines(session: &SessionState, fps: u32) -> [String; 3] {
    let pen = Swatch::from_color(session.active_color()).map_or("CUSTOM", Swatch::name);
    let shares = session
        .palette_stats()
        .iter()
        .map(|st| format!("{}:{:.1}%", st.swatch.name(), st.ratio * 100.0))
        .collect::<Vec<_>>()
        .join("  ");
    [
        format!(
            "FPS:{fps}  CELL:{}  W:{} H:{}  N:{}",
            session.cell_size(),
            session.canvas_width(),
            session.canvas_height(),
            session.sources().len()
        ),
        format!("PEN:{pen}  {shares}"),
        "O/B PEN  -/= CELL  ARROWS SIZE  R RESET  P SAVE".to_string(),
    ]
}

/// Draw HUD lines top-down starting at (x,y), 12 px apart.
pub fn draw_hud(fb: &mut FrameBuffer, x: i32, y: i32, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        draw_text_5x7(fb, x, y + 12 * i as i32, line, INK.to_u32());
    }
}

/* ---------- 5x7 bitmap font (the subset the HUD needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, 1-pixel spacing. Unknown chars leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{GridSpec, render};

    fn px(fb: &FrameBuffer, x: usize, y: usize) -> u32 {
        fb.pixels[y * fb.width + x]
    }

    #[test]
    fn to_canvas_is_half_open() {
        assert_eq!(to_canvas(10.0, 10.0, 100, 100), Some(Point::new(0.0, 0.0)));
        assert_eq!(to_canvas(109.5, 50.0, 100, 100), Some(Point::new(99.5, 40.0)));
        assert_eq!(to_canvas(110.0, 50.0, 100, 100), None);
        assert_eq!(to_canvas(5.0, 50.0, 100, 100), None);
    }

    #[test]
    fn empty_field_shows_background() {
        let grid = GridSpec::new(10.0, 100.0, 100.0).unwrap();
        let field = render(&grid, &[]);
        let mut fb = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT, Color::BLACK);
        draw_scene(&mut fb, PAD as i32, PAD as i32, &field, &SourceSet::new());
        assert_eq!(px(&fb, PAD + 50, PAD + 50), BACKGROUND.to_u32());
    }

    #[test]
    fn last_cell_spills_past_canvas_edge() {
        // width 110, step 20: last column starts at 100 and is drawn to 120
        let grid = GridSpec::new(20.0, 110.0, 100.0).unwrap();
        let mut set = SourceSet::new();
        set.push(Point::new(100.0, 0.0), Swatch::Blue.color());
        let field = render(&grid, set.as_slice());
        let mut fb = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT, Color::BLACK);
        draw_scene(&mut fb, PAD as i32, PAD as i32, &field, &SourceSet::new());
        assert_eq!(px(&fb, PAD + 118, PAD + 10), Swatch::Blue.color().to_u32());
        assert_eq!(px(&fb, PAD + 121, PAD + 10), Color::BLACK.to_u32());
    }

    #[test]
    fn markers_use_source_color() {
        let grid = GridSpec::new(10.0, 200.0, 200.0).unwrap();
        let mut set = SourceSet::new();
        set.push(Point::new(50.0, 60.0), Swatch::Orange.color());
        let field = render(&grid, set.as_slice());
        let mut fb = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT, Color::BLACK);
        draw_scene(&mut fb, PAD as i32, PAD as i32, &field, &set);
        assert_eq!(px(&fb, PAD + 50, PAD + 60), Swatch::Orange.color().to_u32());
    }

    #[test]
    fn hud_reports_session_numbers() {
        let mut s = SessionState::new(5, 200, 120, Swatch::Blue.color());
        s.place_with_pen(Point::new(1.0, 1.0));
        s.place_point(Point::new(2.0, 2.0), Swatch::Orange.color());
        let [numbers, shares, _] = hud_lines(&s, 59);
        assert_eq!(numbers, "FPS:59  CELL:5  W:200 H:120  N:2");
        assert_eq!(shares, "PEN:BLUE  ORANGE:50.0%  BLUE:50.0%");

        s.set_active_color(Color::rgb(0.1, 0.2, 0.3));
        s.reset();
        let [_, shares, _] = hud_lines(&s, 0);
        assert_eq!(shares, "PEN:CUSTOM  ORANGE:0.0%  BLUE:0.0%");
    }

    #[test]
    fn text_draws_known_glyphs_only() {
        let mut fb = FrameBuffer::new(40, 10, Color::WHITE);
        draw_text_5x7(&mut fb, 0, 0, "~", 0);
        assert!(fb.pixels.iter().all(|&p| p == 0x00FF_FFFF));
        draw_text_5x7(&mut fb, 0, 0, "fps", 0);
        assert!(fb.pixels.iter().any(|&p| p == 0));
    }
}
