//! Terminal presentation: the view model the driver reports into and the
//! ratatui renderer that draws it.

pub mod renderer;
pub mod view;

pub use renderer::Renderer;
pub use view::{RecordStatus, Screen, TerminalView};
