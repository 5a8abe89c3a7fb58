use super::search::{SpanPosition, find_next_position, scan_range};
use crate::config::LayouterConfig;
use crate::error::{LayoutError, Result};
use crate::geometry::{Point, Rectangle, Size};
use crate::scoring::PlacementScorer;
use crate::weighted::{WeightedSegment, WeightedSegmentProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumIter};

/// Side of the cloud a layouter grows.
///
/// Bottom/Top search along x, Left/Right along y. y grows downward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Deserialize, Serialize,
)]
pub enum Side {
    Bottom,
    Top,
    Left,
    Right,
}

impl Side {
    /// Coordinate of the center on the search axis
    fn axis_middle(self, center: Point) -> i32 {
        match self {
            Side::Bottom | Side::Top => center.x,
            Side::Left | Side::Right => center.y,
        }
    }

    /// Extent of a rectangle along the search axis
    fn span_length(self, size: Size) -> i32 {
        match self {
            Side::Bottom | Side::Top => size.width,
            Side::Left | Side::Right => size.height,
        }
    }

    fn axis_bounds(self, rect: &Rectangle) -> (i32, i32) {
        match self {
            Side::Bottom | Side::Top => (rect.left(), rect.right()),
            Side::Left | Side::Right => (rect.top(), rect.bottom()),
        }
    }

    /// How far `rect` reaches past the center on this side; negative when it does not.
    fn protrusion(self, center: Point, rect: &Rectangle) -> i32 {
        match self {
            Side::Bottom => rect.bottom() - center.y,
            Side::Top => center.y - rect.top(),
            Side::Right => rect.right() - center.x,
            Side::Left => center.x - rect.left(),
        }
    }

    fn place(self, center: Point, size: Size, pos: SpanPosition, spacing: i32) -> Rectangle {
        let outward = pos.relative + spacing;
        let location = match self {
            Side::Bottom => Point::new(pos.absolute, center.y + outward),
            Side::Top => Point::new(pos.absolute, center.y - outward - size.height),
            Side::Right => Point::new(center.x + outward, pos.absolute),
            Side::Left => Point::new(center.x - outward - size.width, pos.absolute),
        };
        Rectangle::from_location(location, size)
    }
}

/// Places rectangles against one side of the cloud, tracking how far the
/// side has already grown as a weighted profile.
///
/// Usage is two-phase: [`SideLayouter::next_rectangle`] proposes without
/// mutating, the caller commits, then [`SideLayouter::update_weights`] is
/// called with the final rectangle.
pub struct SideLayouter {
    side: Side,
    center: Point,
    profile: WeightedSegmentProfile,
    scorer: Arc<dyn PlacementScorer>,
    config: LayouterConfig,
}

impl SideLayouter {
    pub fn new(
        side: Side,
        center: Point,
        scorer: Arc<dyn PlacementScorer>,
        config: LayouterConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            side,
            center,
            profile: WeightedSegmentProfile::new(),
            scorer,
            config,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn profile(&self) -> &WeightedSegmentProfile {
        &self.profile
    }

    pub fn config(&self) -> &LayouterConfig {
        &self.config
    }

    /// Average terrain height; lower means the side has more room.
    pub fn calculate_coefficient(&self) -> f64 {
        self.profile.average_weight()
    }

    pub fn next_rectangle(&self, size: Size) -> Result<Rectangle> {
        let invalid = || LayoutError::InvalidSize {
            width: size.width,
            height: size.height,
        };
        if size.width < 0 || size.height < 0 {
            return Err(invalid());
        }

        let side_length = self.side.span_length(size);
        let middle = self.side.axis_middle(self.center);
        scan_range(&self.profile, &self.config, side_length, middle).ok_or_else(invalid)?;

        let pos = find_next_position(
            &self.profile,
            self.scorer.as_ref(),
            &self.config,
            side_length,
            middle,
        );
        let rect = self
            .side
            .place(self.center, size, pos, self.config.neighbour_spacing);
        if rect.x.checked_add(rect.width).is_none() || rect.y.checked_add(rect.height).is_none() {
            return Err(invalid());
        }
        log::debug!("{} side proposes {}", self.side, rect);
        Ok(rect)
    }

    /// Raises the profile by the part of `rect` reaching past the center.
    ///
    /// Rectangles that do not reach this side leave the profile untouched.
    pub fn update_weights(&mut self, rect: &Rectangle) -> Result<()> {
        let weight = self.side.protrusion(self.center, rect);
        if weight < 0 {
            return Ok(());
        }
        let (start, end) = self.side.axis_bounds(rect);
        let segment = WeightedSegment::new(start, end, weight)?;
        self.profile.update_greater_weights(segment);
        log::debug!(
            "{} side raised by {}, coefficient {:.2}",
            self.side,
            segment,
            self.calculate_coefficient()
        );
        Ok(())
    }
}

impl std::fmt::Debug for SideLayouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SideLayouter")
            .field("side", &self.side)
            .field("center", &self.center)
            .field("profile", &self.profile)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CenterBiasedScorer;
    use strum::IntoEnumIterator;

    fn layouter(side: Side) -> SideLayouter {
        SideLayouter::new(
            side,
            Point::new(0, 0),
            Arc::new(CenterBiasedScorer::default()),
            LayouterConfig::default(),
        )
        .unwrap()
    }

    fn triples(profile: &WeightedSegmentProfile) -> Vec<(i32, i32, i32)> {
        profile
            .segments()
            .map(|s| (s.start(), s.end(), s.weight()))
            .collect()
    }

    #[test]
    fn test_first_bottom_rectangle_is_centered() {
        let mut bottom = layouter(Side::Bottom);
        let rect = bottom.next_rectangle(Size::new(4, 6)).unwrap();
        assert_eq!(rect, Rectangle::new(-2, 4, 4, 6));

        bottom.update_weights(&rect).unwrap();
        assert_eq!(triples(bottom.profile()), vec![(-2, 2, 10)]);
        assert_eq!(bottom.calculate_coefficient(), 10.0);
    }

    #[test]
    fn test_next_rectangle_does_not_mutate() {
        let bottom = layouter(Side::Bottom);
        let a = bottom.next_rectangle(Size::new(4, 6)).unwrap();
        let b = bottom.next_rectangle(Size::new(4, 6)).unwrap();
        assert_eq!(a, b);
        assert!(bottom.profile().is_empty());
    }

    #[test]
    fn test_consecutive_rectangles_keep_spacing() {
        let mut bottom = layouter(Side::Bottom);
        let spacing = bottom.config().neighbour_spacing;

        let a = bottom.next_rectangle(Size::new(10, 6)).unwrap();
        bottom.update_weights(&a).unwrap();
        let b = bottom.next_rectangle(Size::new(10, 6)).unwrap();
        bottom.update_weights(&b).unwrap();

        assert!(!a.intersects(&b));
        assert!(!a.inflate(spacing).intersects(&b));
    }

    #[test]
    fn test_second_rectangle_settles_beside_first() {
        let mut bottom = layouter(Side::Bottom);
        let a = bottom.next_rectangle(Size::new(4, 6)).unwrap();
        bottom.update_weights(&a).unwrap();

        let b = bottom.next_rectangle(Size::new(10, 6)).unwrap();
        assert_eq!(b, Rectangle::new(-10, 14, 10, 6));
    }

    #[test]
    fn test_every_side_places_first_rectangle_outward() {
        let size = Size::new(6, 4);
        let expected = [
            (Side::Bottom, Rectangle::new(-3, 4, 6, 4)),
            (Side::Top, Rectangle::new(-3, -8, 6, 4)),
            (Side::Left, Rectangle::new(-10, -2, 6, 4)),
            (Side::Right, Rectangle::new(4, -2, 6, 4)),
        ];
        for (side, want) in expected {
            let rect = layouter(side).next_rectangle(size).unwrap();
            assert_eq!(rect, want, "{} side", side);
        }
    }

    #[test]
    fn test_every_side_records_its_protrusion() {
        for side in Side::iter() {
            let mut l = layouter(side);
            let rect = l.next_rectangle(Size::new(6, 4)).unwrap();
            l.update_weights(&rect).unwrap();

            let (start, end) = side.axis_bounds(&rect);
            let weight = side.protrusion(l.center(), &rect);
            assert_eq!(triples(l.profile()), vec![(start, end, weight)], "{} side", side);
            assert!(weight > 0);
        }
    }

    #[test]
    fn test_update_ignores_rectangles_on_the_other_side() {
        let mut bottom = layouter(Side::Bottom);
        let above = Rectangle::new(0, -20, 4, 6);
        bottom.update_weights(&above).unwrap();
        assert!(bottom.profile().is_empty());
    }

    #[test]
    fn test_update_from_neighbouring_side() {
        let mut right = layouter(Side::Right);
        // sits below the center, reaching 2 past it to the right
        let rect = Rectangle::new(-2, 4, 4, 6);
        right.update_weights(&rect).unwrap();
        assert_eq!(triples(right.profile()), vec![(4, 10, 2)]);
    }

    #[test]
    fn test_rejects_negative_size() {
        let bottom = layouter(Side::Bottom);
        let err = bottom.next_rectangle(Size::new(-1, 4)).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidSize {
                width: -1,
                height: 4
            }
        ));
    }

    #[test]
    fn test_rejects_sizes_overflowing_search() {
        let bottom = layouter(Side::Bottom);
        for width in [i32::MAX, i32::MAX - 10] {
            let err = bottom.next_rectangle(Size::new(width, 4)).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidSize { .. }), "width {}", width);
        }
        let right = layouter(Side::Right);
        assert!(right.next_rectangle(Size::new(4, i32::MAX)).is_err());
    }

    #[test]
    fn test_update_rejects_inverted_rectangle() {
        let mut bottom = layouter(Side::Bottom);
        let err = bottom
            .update_weights(&Rectangle::new(5, 0, -3, 4))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSegment { start: 5, end: 2 }));
        assert!(bottom.profile().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = LayouterConfig {
            neighbour_spacing: -2,
            ..Default::default()
        };
        let result = SideLayouter::new(
            Side::Top,
            Point::new(0, 0),
            Arc::new(CenterBiasedScorer::default()),
            config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_spacing_is_honoured() {
        let config = LayouterConfig {
            neighbour_spacing: 5,
            ..Default::default()
        };
        let bottom = SideLayouter::new(
            Side::Bottom,
            Point::new(10, 10),
            Arc::new(CenterBiasedScorer::default()),
            config,
        )
        .unwrap();
        let rect = bottom.next_rectangle(Size::new(4, 4)).unwrap();
        assert_eq!(rect, Rectangle::new(8, 20, 4, 4));
    }

    #[test]
    fn test_profile_stays_consistent_over_many_insertions() {
        let mut bottom = layouter(Side::Bottom);
        let sizes = [(12, 5), (3, 9), (20, 2), (7, 7), (1, 1), (15, 4), (9, 3)];
        let mut placed: Vec<Rectangle> = Vec::new();

        for (w, h) in sizes {
            let rect = bottom.next_rectangle(Size::new(w, h)).unwrap();
            for other in &placed {
                assert!(!rect.intersects(other), "{} overlaps {}", rect, other);
            }
            bottom.update_weights(&rect).unwrap();
            bottom.profile().validate().unwrap();
            placed.push(rect);
        }
        assert!(bottom.calculate_coefficient() > 0.0);
    }
}
