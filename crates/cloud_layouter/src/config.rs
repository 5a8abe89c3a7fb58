use crate::{
    constants::{
        DEFAULT_DISTANCE_COEFFICIENT, DEFAULT_NEIGHBOUR_SPACING, DEFAULT_SEARCH_OFFSET_FACTOR,
        DEFAULT_WEIGHT_COEFFICIENT,
    },
    error::{LayoutError, Result},
    geometry::Point,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub layouter: LayouterConfig,
    #[serde(default)]
    pub scorer: ScorerConfig,
    #[serde(default)]
    pub cloud: CloudConfig,
}

/// Tunables shared by every side layouter
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayouterConfig {
    /// Minimum clearance between neighbouring rectangles on one side
    pub neighbour_spacing: i32,
    /// Share of the search window scanned beyond the profile bounds on each end
    pub search_offset_factor: f64,
}

impl Default for LayouterConfig {
    fn default() -> Self {
        Self {
            neighbour_spacing: DEFAULT_NEIGHBOUR_SPACING,
            search_offset_factor: DEFAULT_SEARCH_OFFSET_FACTOR,
        }
    }
}

impl LayouterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighbour_spacing < 0 {
            return Err(LayoutError::Config(format!(
                "neighbour_spacing must be non-negative, got {}",
                self.neighbour_spacing
            )));
        }
        if !self.search_offset_factor.is_finite() || self.search_offset_factor < 0.0 {
            return Err(LayoutError::Config(format!(
                "search_offset_factor must be a finite non-negative number, got {}",
                self.search_offset_factor
            )));
        }
        Ok(())
    }
}

/// Coefficients of the bundled center-biased scorer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub weight_coefficient: f64,
    pub distance_coefficient: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            weight_coefficient: DEFAULT_WEIGHT_COEFFICIENT,
            distance_coefficient: DEFAULT_DISTANCE_COEFFICIENT,
        }
    }
}

impl ScorerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("weight_coefficient", self.weight_coefficient),
            ("distance_coefficient", self.distance_coefficient),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudConfig {
    pub center_x: i32,
    pub center_y: i32,
}

impl CloudConfig {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}

impl Config {
    /// Load from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LayoutError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LayoutError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layouter.validate()?;
        self.scorer.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.layouter.neighbour_spacing, 2);
        assert_eq!(config.layouter.search_offset_factor, 0.8);
        assert_eq!(config.cloud.center(), Point::new(0, 0));
        config.validate().unwrap();
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
[layouter]
neighbour_spacing = 4

[cloud]
center_x = 100
center_y = 50
"#,
        );
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.layouter.neighbour_spacing, 4);
        assert_eq!(config.layouter.search_offset_factor, 0.8);
        assert_eq!(config.scorer, ScorerConfig::default());
        assert_eq!(config.cloud.center(), Point::new(100, 50));
    }

    #[test]
    fn test_load_rejects_negative_spacing() {
        let file = write_config("[layouter]\nneighbour_spacing = -1\n");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let file = write_config("[layouter\n");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file(Path::new("no_such_config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_scorer_rejects_nan() {
        let cfg = ScorerConfig {
            weight_coefficient: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
