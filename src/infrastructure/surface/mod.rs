//! Map surface implementations

pub mod memory;

pub use memory::{InMemoryMapSurface, OpenPopup};
