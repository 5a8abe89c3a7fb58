//! Run-length height maps along one side of the cloud.

pub mod profile;
pub mod segment;

pub use profile::WeightedSegmentProfile;
pub use segment::WeightedSegment;
