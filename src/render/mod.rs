//! Figure rendering to PNG with plotters.

mod backend;
mod figure;

pub use backend::{approximate_text_size, TextSafeBackend};
pub use figure::FigureRenderer;
