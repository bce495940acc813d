mod component;
mod layout;
mod palette;
mod render;
mod ripple;
mod scheduler;
mod state;
mod types;

pub use component::RippleMap;
pub use types::Degree;
