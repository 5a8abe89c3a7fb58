//! Side layouters: pick where the next rectangle goes on one side of the cloud
//! and keep that side's terrain profile current.

pub mod search;
pub mod side;

pub use search::{SpanPosition, find_next_position};
pub use side::{Side, SideLayouter};
