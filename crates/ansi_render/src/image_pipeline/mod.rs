pub mod grid;
pub mod loader;
pub mod resize;
