pub mod charts;
pub mod renderer;

pub use charts::ChartsView;
pub use renderer::{CellKind, Renderer, cell_kind};
