use crate::config::LayouterConfig;
use crate::constants::NO_TERRAIN_WEIGHT;
use crate::scoring::PlacementScorer;
use crate::weighted::{WeightedSegment, WeightedSegmentProfile};
use std::collections::VecDeque;
use std::iter;

/// Result of the window search along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanPosition {
    /// Axis coordinate where the rectangle starts
    pub absolute: i32,
    /// Offset from the center at which the rectangle's inner edge sits
    pub relative: i32,
}

/// Sliding window over consecutive segments with a cached maximum weight.
struct MergedWindow {
    segments: VecDeque<WeightedSegment>,
    weight: i32,
}

impl MergedWindow {
    fn new() -> Self {
        Self {
            segments: VecDeque::new(),
            weight: i32::MIN,
        }
    }

    fn push(&mut self, segment: WeightedSegment, span: i32) {
        self.segments.push_back(segment);
        self.weight = self.weight.max(segment.weight());

        // drop the front while the rest alone is longer than the window
        while self.segments.len() > 1 {
            let Some(front) = self.segments.front() else {
                break;
            };
            if segment.end() - front.end() <= span {
                break;
            }
            if let Some(evicted) = self.segments.pop_front()
                && evicted.weight() == self.weight
            {
                self.weight = self
                    .segments
                    .iter()
                    .map(WeightedSegment::weight)
                    .max()
                    .unwrap_or(i32::MIN);
            }
        }
    }

    fn min(&self) -> Option<i32> {
        self.segments.front().map(WeightedSegment::start)
    }

    fn max(&self) -> Option<i32> {
        self.segments.back().map(WeightedSegment::end)
    }
}

/// Finds the best span of `side_length` (plus spacing on both ends) along
/// `profile`, scanning a little past both profile bounds.
///
/// Candidates are compared by `scorer`; on equal scores the earlier window
/// wins. `side_length` must be non-negative.
pub fn find_next_position(
    profile: &WeightedSegmentProfile,
    scorer: &dyn PlacementScorer,
    config: &LayouterConfig,
    side_length: i32,
    middle: i32,
) -> SpanPosition {
    debug_assert!(side_length >= 0);
    let spacing = config.neighbour_spacing;
    let span = side_length + 2 * spacing;
    let offset = offset_length(span, config.search_offset_factor);

    let (lo, hi) = anchor(profile, middle);
    let before = WeightedSegment::new_unchecked(lo - offset, lo, NO_TERRAIN_WEIGHT);
    let after = WeightedSegment::new_unchecked(hi, hi + offset, NO_TERRAIN_WEIGHT);
    let candidates = iter::once(before)
        .chain(profile.segments())
        .chain(iter::once(after))
        .filter(|s| !s.is_empty());

    let mut window = MergedWindow::new();
    let mut best: Option<(f64, WeightedSegment)> = None;

    for segment in candidates {
        window.push(segment, span);
        let (Some(min), Some(max)) = (window.min(), window.max()) else {
            continue;
        };
        if max - min < span {
            continue;
        }

        let start = scorer
            .preferred_start(min, max, span, middle)
            .clamp(min, max - span);
        let distance = distance_to_center(start, span, middle);
        let score = scorer.segment_score(window.weight, distance);
        log::trace!(
            "window [{}, {})@{}: start {} distance {:.1} score {:.3}",
            min,
            max,
            window.weight,
            start,
            distance,
            score
        );

        if best.is_some_and(|(best_score, _)| score <= best_score) {
            continue;
        }
        best = Some((
            score,
            WeightedSegment::new_unchecked(start, start + span, window.weight.max(0)),
        ));
    }

    match best {
        Some((_, chosen)) => SpanPosition {
            absolute: chosen.start() + spacing,
            relative: chosen.weight() + spacing,
        },
        None => {
            log::warn!(
                "no window of length {} fits around [{}, {}); centering on {}",
                span, lo, hi, middle
            );
            SpanPosition {
                absolute: middle - span / 2 + spacing,
                relative: NO_TERRAIN_WEIGHT + spacing,
            }
        }
    }
}

/// Outermost coordinates the search for `side_length` touches, `None` when
/// they or the distance between them do not fit in `i32`.
pub(crate) fn scan_range(
    profile: &WeightedSegmentProfile,
    config: &LayouterConfig,
    side_length: i32,
    middle: i32,
) -> Option<(i32, i32)> {
    let span = config
        .neighbour_spacing
        .checked_mul(2)?
        .checked_add(side_length)?;
    let offset = offset_length(span, config.search_offset_factor);
    let (lo, hi) = anchor(profile, middle);
    let (first, last) = (lo.checked_sub(offset)?, hi.checked_add(offset)?);
    last.checked_sub(first)?;
    Some((first, last))
}

/// An empty profile has no bounds yet; search around the middle.
fn anchor(profile: &WeightedSegmentProfile, middle: i32) -> (i32, i32) {
    if profile.is_empty() {
        (middle, middle)
    } else {
        (profile.start(), profile.end())
    }
}

fn offset_length(span: i32, factor: f64) -> i32 {
    (factor.max(0.0) * f64::from(span)).floor() as i32
}

fn distance_to_center(start: i32, span: i32, middle: i32) -> f64 {
    (f64::from(middle) - (f64::from(start) + f64::from(span) / 2.0)).abs()
}
