//! Interactive color field.
//!
//! Users drop colored point sources on a canvas; every grid cell shows the
//! distance-weighted blend of the sources that reach it.
//!
//! - [`sampler`]: the O(cells x sources) blending pass and its render cache
//! - [`kernel`]: linear falloff weight keyed to half the canvas width
//! - [`session`]: bounded setters, placements and change notifications
//! - [`clock`]: tick-driven frames-per-second counter
//! - [`draw`]: minifb window, software drawing and the HUD font
//!
//! ```rust
//! use color_field::color::Swatch;
//! use color_field::sampler::render;
//! use color_field::session::SessionState;
//! use color_field::sources::Point;
//!
//! let mut session = SessionState::default();
//! session.place_point(Point::new(0.0, 0.0), Swatch::Orange.color());
//! let field = render(&session.grid(), session.sources().as_slice());
//! assert_eq!(field.get(0, 0), Some(Swatch::Orange.color()));
//! ```

pub mod clock;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod kernel;
pub mod sampler;
pub mod session;
pub mod signal;
pub mod sources;
pub mod types;

pub use error::{Error, Result};
