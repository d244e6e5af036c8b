// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// A grid that the sampler cannot render (zero width, cell size below 1, ...)
    #[error("Invalid grid: cell size {cell_size}, canvas {width}x{height}")]
    InvalidGrid {
        cell_size: f32,
        width: f32,
        height: f32,
    },

    /// Writing the PNG snapshot failed
    #[error("Export error: {0}")]
    Export(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
