/// Layouter defaults
pub const DEFAULT_NEIGHBOUR_SPACING: i32 = 2; // clearance between neighbours on one side
pub const DEFAULT_SEARCH_OFFSET_FACTOR: f64 = 0.8; // share of the window searched past the profile bounds

/// Reference scorer defaults
pub const DEFAULT_WEIGHT_COEFFICIENT: f64 = 1.0;
pub const DEFAULT_DISTANCE_COEFFICIENT: f64 = 1.0;

/// Weight of terrain nobody has placed anything on yet
pub const NO_TERRAIN_WEIGHT: i32 = 0;
