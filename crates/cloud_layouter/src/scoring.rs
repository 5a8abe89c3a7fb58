//! Placement policy consulted by the window search.

use crate::config::ScorerConfig;

/// Decides where a window prefers its span and how good a candidate is.
///
/// Shared read-only by every side of one cloud.
pub trait PlacementScorer: Send + Sync {
    /// Preferred absolute start of a span of `span_length` inside the merged
    /// window `[window_min, window_max)`, given the axis `middle`.
    fn preferred_start(
        &self,
        window_min: i32,
        window_max: i32,
        span_length: i32,
        middle: i32,
    ) -> i32;

    /// Higher is better.
    fn segment_score(&self, weight: i32, distance_to_center: f64) -> f64;
}

/// Centers spans on the middle when the window allows it and penalises
/// terrain height and distance linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterBiasedScorer {
    pub weight_coefficient: f64,
    pub distance_coefficient: f64,
}

impl CenterBiasedScorer {
    pub fn new(weight_coefficient: f64, distance_coefficient: f64) -> Self {
        Self {
            weight_coefficient,
            distance_coefficient,
        }
    }
}

impl Default for CenterBiasedScorer {
    fn default() -> Self {
        ScorerConfig::default().into()
    }
}

impl From<ScorerConfig> for CenterBiasedScorer {
    fn from(cfg: ScorerConfig) -> Self {
        Self::new(cfg.weight_coefficient, cfg.distance_coefficient)
    }
}

impl PlacementScorer for CenterBiasedScorer {
    fn preferred_start(
        &self,
        window_min: i32,
        window_max: i32,
        span_length: i32,
        middle: i32,
    ) -> i32 {
        let centered = middle - span_length / 2;
        let latest = (window_max - span_length).max(window_min);
        centered.clamp(window_min, latest)
    }

    fn segment_score(&self, weight: i32, distance_to_center: f64) -> f64 {
        -(self.weight_coefficient * f64::from(weight)
            + self.distance_coefficient * distance_to_center)
    }
}
