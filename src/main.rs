mod components;
mod config;
mod error;
mod model;
mod render;
mod solver;
mod state;
mod util;

fn main() {
    yew::Renderer::<components::App>::new().render();
}
