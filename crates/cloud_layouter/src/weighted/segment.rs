use crate::error::{LayoutError, Result};
use std::fmt;

/// Half-open interval `[start, end)` on one axis carrying a terrain height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightedSegment {
    start: i32,
    end: i32,
    weight: i32,
}

impl WeightedSegment {
    /// Rejects reversed bounds and negative weights.
    pub fn new(start: i32, end: i32, weight: i32) -> Result<Self> {
        if start > end {
            return Err(LayoutError::InvalidSegment { start, end });
        }
        if weight < 0 {
            return Err(LayoutError::NegativeWeight(weight));
        }
        Ok(Self { start, end, weight })
    }

    /// Callers guarantee `start <= end` and `weight >= 0`.
    #[inline]
    pub(crate) fn new_unchecked(start: i32, end: i32, weight: i32) -> Self {
        debug_assert!(start <= end && weight >= 0);
        Self { start, end, weight }
    }

    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.end
    }

    #[inline]
    pub fn weight(&self) -> i32 {
        self.weight
    }

    #[inline]
    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Adjacent or overlapping along the axis.
    pub fn is_mergeable(&self, other: &WeightedSegment) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for WeightedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})@{}", self.start, self.end, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_reversed_bounds() {
        let err = WeightedSegment::new(5, 3, 1).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSegment { start: 5, end: 3 }));
    }

    #[test]
    fn test_new_rejects_negative_weight() {
        let err = WeightedSegment::new(0, 3, -1).unwrap_err();
        assert!(matches!(err, LayoutError::NegativeWeight(-1)));
    }

    #[test]
    fn test_empty_segment_is_allowed() {
        let seg = WeightedSegment::new(4, 4, 7).unwrap();
        assert!(seg.is_empty());
        assert_eq!(seg.len(), 0);
    }

    #[test]
    fn test_mergeable() {
        let a = WeightedSegment::new(0, 5, 1).unwrap();
        let b = WeightedSegment::new(5, 8, 2).unwrap();
        let c = WeightedSegment::new(9, 10, 2).unwrap();
        assert!(a.is_mergeable(&b));
        assert!(b.is_mergeable(&a));
        assert!(!a.is_mergeable(&c));
    }

    #[test]
    fn test_display() {
        let seg = WeightedSegment::new(-2, 2, 10).unwrap();
        assert_eq!(seg.to_string(), "[-2, 2)@10");
    }
}
