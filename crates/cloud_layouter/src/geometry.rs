pub mod types;

pub use types::{Point, Rectangle, Size};
