// What you SEE:
// • A white canvas; release the left mouse button on it to drop a colored source.
// • Every cell shows the distance-weighted blend of the sources that reach it.
// • O / B pick the orange or blue pen. - / = change the cell size.
// • Left/Right change the canvas width, Down/Up its height.
// • R clears all sources, P saves the field as PNG, ESC quits.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use clap::Parser;
use minifb::Key;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use color_field::clock::{FrameClock, TickSource};
use color_field::color::Swatch;
use color_field::config::{Args, CANVAS_HEIGHT, CANVAS_WIDTH};
use color_field::draw::{
    CANVAS_MAX, Drawer, PAD, WINDOW_BG, WINDOW_HEIGHT, WINDOW_WIDTH, draw_crosshair, draw_hud,
    draw_scene, hud_lines, to_canvas,
};
use color_field::error::Error;
use color_field::export::save_png;
use color_field::sampler::{FieldCache, RenderMode};
use color_field::session::SessionState;
use color_field::types::FrameBuffer;

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_tracing(&args.log);

    /* --- Session + render cache ---
       Visual: nothing yet; this is the state every input goes through. */
    let pen = Swatch::from(args.pen);
    let mut session = SessionState::new(args.cell_size, args.width, args.height, pen.color());
    session.subscribe(|event| debug!(?event, "session changed"));
    let mode = if args.serial { RenderMode::Serial } else { RenderMode::Parallel };
    let mut cache = FieldCache::new(mode);
    info!(
        cell_size = session.cell_size(),
        width = session.canvas_width(),
        height = session.canvas_height(),
        ?mode,
        "session started"
    );

    /* --- Window + reusable screen buffer ---
       Visual: window opens; `screen` is the image you actually see each frame. */
    let mut drawer = Drawer::new("Color Field")?;
    let mut screen = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT, WINDOW_BG);

    /* --- Frame clock ---
       The loop itself is the tick source; the clock listens until teardown. */
    let mut ticks = TickSource::new();
    let clock = FrameClock::attach(Rc::new(RefCell::new(FrameClock::new())), &mut ticks);
    let started = Instant::now();
    let mut snapshots: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Tick. Cheap: only counts frames. */
        ticks.notify(&started.elapsed().as_secs_f64());

        /* 2) Inputs */
        if let Some(p) = drawer.poll_release(session.canvas_width(), session.canvas_height()) {
            session.place_with_pen(p); // visual: a new marker + the wash shifts
        }
        if drawer.pressed_once(Key::O) { session.set_active_color(Swatch::Orange.color()); }
        if drawer.pressed_once(Key::B) { session.set_active_color(Swatch::Blue.color()); }
        if drawer.pressed_repeat(Key::Minus) { session.set_cell_size(session.cell_size().saturating_sub(1)); }
        if drawer.pressed_repeat(Key::Equal) { session.set_cell_size(session.cell_size() + 1); }
        if drawer.pressed_repeat(Key::Left) {
            session.set_canvas_width(session.canvas_width().saturating_sub(CANVAS_WIDTH.step));
        }
        if drawer.pressed_repeat(Key::Right) {
            session.set_canvas_width(session.canvas_width() + CANVAS_WIDTH.step);
        }
        if drawer.pressed_repeat(Key::Down) {
            session.set_canvas_height(session.canvas_height().saturating_sub(CANVAS_HEIGHT.step));
        }
        if drawer.pressed_repeat(Key::Up) {
            session.set_canvas_height(session.canvas_height() + CANVAS_HEIGHT.step);
        }
        if drawer.pressed_once(Key::R) { session.reset(); }

        /* 3) Recompute the field only if something invalidated it.
           Runs after the tick, so a dirty field is at most one frame stale. */
        cache.refresh(&session);

        /* 4) Compose: field + markers, pen crosshair, HUD */
        screen.clear(WINDOW_BG);
        if let Some(field) = cache.field() {
            draw_scene(&mut screen, PAD as i32, PAD as i32, field, session.sources());
        }
        if let Some((mx, my)) = drawer.mouse_pos() {
            if to_canvas(mx, my, session.canvas_width(), session.canvas_height()).is_some() {
                let pen = session.active_color().to_u32();
                draw_crosshair(&mut screen, mx as i32, my as i32, 10, pen);
            }
        }
        let hud_top = (PAD + CANVAS_MAX + PAD + 4) as i32;
        draw_hud(&mut screen, PAD as i32, hud_top, &hud_lines(&session, clock.fps()));

        /* 5) Snapshot on P */
        if drawer.pressed_once(Key::P) {
            if let Some(field) = cache.field() {
                snapshots += 1;
                let path = PathBuf::from(format!("color-field-{snapshots:03}.png"));
                if let Err(e) = save_png(field, &path) {
                    warn!(error = %e, "snapshot failed");
                }
            }
        }

        /* 6) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;
    }

    /* Teardown: the clock must not outlive the loop that feeds it. */
    clock.detach(&mut ticks);
    info!(sources = session.sources().len(), "session ended");
    Ok(())
}
