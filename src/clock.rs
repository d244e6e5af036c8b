// Frame clock: counts ticks and publishes frames-per-second once per 1 s window.
// Visual: drives the "FPS:" number in the HUD.
//
// Ticks come from an external source (the window loop) as monotonic
// timestamps in seconds. The clock subscribes to that source and must be
// detached on teardown so nothing keeps ticking into it afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::signal::{Observers, SubscriptionId};

/// External tick event source: each event is a timestamp in seconds.
pub type TickSource = Observers<f64>;

/// Length of one fps measurement window, in seconds.
pub const WINDOW_SECS: f64 = 1.0;

#[derive(Debug, Default)]
pub struct FrameClock {
    running: bool,
    last_tick: Option<f64>,    // None until the priming tick arrives
    window_start: f64,
    frames_in_window: u32,
    fps: u32,                  // stale between window completions
}

impl FrameClock {
    /// A clock that is already running and waiting for its priming tick.
    pub fn new() -> Self {
        let mut clock = Self::default();
        clock.start();
        clock
    }

    /// (Re)start: forget everything, the next tick only primes.
    pub fn start(&mut self) {
        *self = Self {
            running: true,
            ..Self::default()
        };
    }

    /// Further ticks are ignored until `start` is called again.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed one tick; returns the current fps (unchanged unless a window closed).
    pub fn on_tick(&mut self, timestamp: f64) -> u32 {
        if !self.running {
            return self.fps;
        }
        if self.last_tick.is_none() {
            // Priming tick: no baseline existed, so this interval is not counted.
            self.last_tick = Some(timestamp);
            self.window_start = timestamp;
            return self.fps;
        }
        self.last_tick = Some(timestamp);
        self.frames_in_window += 1;
        if timestamp - self.window_start >= WINDOW_SECS {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = timestamp;
            trace!(fps = self.fps, "fps window closed");
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    /// Subscribe a shared clock to `ticks`. Keep the handle to detach later.
    pub fn attach(clock: Rc<RefCell<FrameClock>>, ticks: &mut TickSource) -> ClockHandle {
        clock.borrow_mut().start();
        let target = clock.clone();
        let subscription = ticks.subscribe(move |ts| {
            target.borrow_mut().on_tick(*ts);
        });
        ClockHandle { clock, subscription }
    }
}

/// Scoped link between a clock and its tick source.
pub struct ClockHandle {
    clock: Rc<RefCell<FrameClock>>,
    subscription: SubscriptionId,
}

impl ClockHandle {
    pub fn fps(&self) -> u32 {
        self.clock.borrow().fps()
    }

    /// Stop the clock and drop its tick subscription.
    pub fn detach(self, ticks: &mut TickSource) {
        self.clock.borrow_mut().stop();
        ticks.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_only_primes() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.on_tick(5.0), 0);
        assert_eq!(clock.last_tick(), Some(5.0));
        // A full window later with one counted tick -> fps = 1
        assert_eq!(clock.on_tick(6.0), 1);
    }

    #[test]
    fn fps_equals_ticks_per_window_and_holds() {
        let mut clock = FrameClock::new();
        clock.on_tick(0.0);
        for i in 1..4 {
            assert_eq!(clock.on_tick(i as f64 * 0.25), 0, "stale before first window");
        }
        assert_eq!(clock.on_tick(1.0), 4);

        // Second window: 10 ticks in 1 s; fps holds at 4 until 2.0
        for i in 1..10 {
            assert_eq!(clock.on_tick(1.0 + i as f64 * 0.1), 4);
        }
        assert_eq!(clock.on_tick(2.0), 10);
        assert_eq!(clock.fps(), 10);
    }

    #[test]
    fn stopped_clock_ignores_ticks_and_restart_primes_again() {
        let mut clock = FrameClock::new();
        clock.on_tick(0.0);
        clock.on_tick(1.0);
        assert_eq!(clock.fps(), 1);
        clock.stop();
        assert_eq!(clock.on_tick(2.0), 1);
        assert_eq!(clock.on_tick(3.0), 1);

        clock.start();
        assert_eq!(clock.fps(), 0);
        assert_eq!(clock.on_tick(10.0), 0);
        assert_eq!(clock.on_tick(11.0), 1);
    }

    #[test]
    fn detach_releases_subscription() {
        let mut ticks = TickSource::new();
        let clock = Rc::new(RefCell::new(FrameClock::default()));
        let handle = FrameClock::attach(clock.clone(), &mut ticks);
        assert_eq!(ticks.len(), 1);

        for ts in [0.0, 0.5, 1.0] {
            ticks.notify(&ts);
        }
        assert_eq!(handle.fps(), 2);

        handle.detach(&mut ticks);
        assert!(ticks.is_empty());
        assert!(!clock.borrow().is_running());

        for ts in [1.5, 2.0, 2.5] {
            ticks.notify(&ts);
        }
        assert_eq!(clock.borrow().last_tick(), Some(1.0));
        assert_eq!(clock.borrow().fps(), 2);
    }
}
