mod component;
mod interaction;
mod physics;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
