pub mod color;
pub mod surface;
pub mod task;
