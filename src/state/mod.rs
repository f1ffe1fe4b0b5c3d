pub mod geometry;
pub mod input;
pub mod player;

pub use geometry::ViewportGeometry;
pub use input::InputController;
pub use player::{Advance, PlayerState, StepPlayer};
