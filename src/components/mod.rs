pub mod algorithm_panel;
pub mod app;
pub mod controls_panel;
pub mod grid_view;
pub mod legend_panel;
pub mod status_line;

pub use app::App;
