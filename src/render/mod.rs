//! Rendering model.

pub mod frame;

pub use frame::{Drawable, Frame, Shape};
