//! Application layer: wires adapters and services into a viewing session.

pub mod session;

pub use session::{Viewer, ViewerSession};
