pub mod headless;

pub use headless::{HeadlessController, HeadlessSurface};
