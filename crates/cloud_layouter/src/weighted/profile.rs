use super::segment::WeightedSegment;
use crate::constants::NO_TERRAIN_WEIGHT;
use crate::error::{LayoutError, Result};
use itertools::Itertools;

/// Gap-free run-length height map covering `[start, end)`.
///
/// Invariants (checked by [`WeightedSegmentProfile::validate`]):
///    - segments are sorted and contiguous: `segments[i].end == segments[i + 1].start`
///    - no two neighbouring segments share a weight
///    - weights only ever grow, point by point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedSegmentProfile {
    segments: Vec<WeightedSegment>,
}

impl WeightedSegmentProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the covered range, 0 while empty.
    pub fn start(&self) -> i32 {
        self.segments.first().map_or(0, WeightedSegment::start)
    }

    /// End of the covered range, 0 while empty.
    pub fn end(&self) -> i32 {
        self.segments.last().map_or(0, WeightedSegment::end)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Length-weighted mean of the weights, 0 for an empty profile.
    pub fn average_weight(&self) -> f64 {
        let total = i64::from(self.end()) - i64::from(self.start());
        if total <= 0 {
            return 0.0;
        }
        let integral: i64 = self
            .segments
            .iter()
            .map(|s| i64::from(s.len()) * i64::from(s.weight()))
            .sum();
        integral as f64 / total as f64
    }

    /// Segments in ascending order; every call starts over from a fresh snapshot.
    pub fn segments(&self) -> impl Iterator<Item = WeightedSegment> + '_ {
        self.segments.iter().copied()
    }

    /// Weight at `x`, `None` outside `[start, end)`.
    pub fn weight_at(&self, x: i32) -> Option<i32> {
        self.overlapping(x, x.saturating_add(1))
            .first()
            .map(WeightedSegment::weight)
    }

    /// Raises every point of `segment` to at least `segment.weight()`.
    ///
    /// Ranges outside the current bounds are covered at the new weight; a gap
    /// between the old bounds and a disjoint update is filled with no terrain.
    pub fn update_greater_weights(&mut self, segment: WeightedSegment) {
        if segment.is_empty() {
            return;
        }
        if self.segments.is_empty() {
            log::trace!("profile initialised with {}", segment);
            self.segments.push(segment);
            return;
        }

        let (start, end) = (self.start(), self.end());
        let inside = segment.start() >= start && segment.end() <= end;
        if inside
            && self
                .overlapping(segment.start(), segment.end())
                .iter()
                .all(|s| s.weight() >= segment.weight())
        {
            return;
        }

        let mut merged = Vec::with_capacity(self.segments.len() + 3);

        if segment.start() < start {
            push_coalesced(
                &mut merged,
                segment.start(),
                segment.end().min(start),
                segment.weight(),
            );
            push_coalesced(&mut merged, segment.end(), start, NO_TERRAIN_WEIGHT);
        }

        for s in &self.segments {
            let lo = s.start().max(segment.start());
            let hi = s.end().min(segment.end());
            if lo >= hi {
                push_coalesced(&mut merged, s.start(), s.end(), s.weight());
                continue;
            }
            push_coalesced(&mut merged, s.start(), lo, s.weight());
            push_coalesced(&mut merged, lo, hi, s.weight().max(segment.weight()));
            push_coalesced(&mut merged, hi, s.end(), s.weight());
        }

        if segment.end() > end {
            push_coalesced(&mut merged, end, segment.start(), NO_TERRAIN_WEIGHT);
            push_coalesced(
                &mut merged,
                segment.start().max(end),
                segment.end(),
                segment.weight(),
            );
        }

        self.segments = merged;
        log::trace!(
            "profile raised by {}: [{}, {}) in {} segments",
            segment,
            self.start(),
            self.end(),
            self.segments.len()
        );
        debug_assert!(self.validate().is_ok(), "{:?}", self.validate());
    }

    /// Checks the profile invariants.
    pub fn validate(&self) -> Result<()> {
        for (a, b) in self.segments.iter().tuple_windows() {
            if a.end() != b.start() {
                return Err(LayoutError::CorruptProfile {
                    message: format!("{} and {} are not contiguous", a, b),
                });
            }
            if a.weight() == b.weight() {
                return Err(LayoutError::CorruptProfile {
                    message: format!("{} and {} share a weight", a, b),
                });
            }
        }
        if let Some(empty) = self.segments.iter().find(|s| s.is_empty()) {
            return Err(LayoutError::CorruptProfile {
                message: format!("empty segment {}", empty),
            });
        }
        Ok(())
    }

    /// Segments intersecting `[start, end)`.
    fn overlapping(&self, start: i32, end: i32) -> &[WeightedSegment] {
        let first = self.segments.partition_point(|s| s.end() <= start);
        let last = self.segments.partition_point(|s| s.start() < end);
        if first >= last {
            return &[];
        }
        &self.segments[first..last]
    }
}

/// Appends `[start, end)@weight`, extending the last segment when weights match.
fn push_coalesced(out: &mut Vec<WeightedSegment>, start: i32, end: i32, weight: i32) {
    if start >= end {
        return;
    }
    if let Some(last) = out.last_mut()
        && last.weight() == weight
        && last.end() == start
    {
        *last = WeightedSegment::new_unchecked(last.start(), end, weight);
        return;
    }
    out.push(WeightedSegment::new_unchecked(start, end, weight));
}
