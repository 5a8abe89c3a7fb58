pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod layouter;
pub mod scoring;
pub mod weighted;

pub use config::{CloudConfig, Config, LayouterConfig, ScorerConfig};
pub use constants::{DEFAULT_NEIGHBOUR_SPACING, DEFAULT_SEARCH_OFFSET_FACTOR};
pub use error::{LayoutError, Result};
pub use geometry::{Point, Rectangle, Size};
pub use layouter::{Side, SideLayouter, SpanPosition, find_next_position};
pub use scoring::{CenterBiasedScorer, PlacementScorer};
pub use weighted::{WeightedSegment, WeightedSegmentProfile};
