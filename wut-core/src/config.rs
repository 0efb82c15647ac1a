//! Chart configuration.
//!
//! Every field has a default matching the shipped widget, so a config file only
//! needs to name what it overrides. Configuration is validated once when a
//! [`WaterTracker`](crate::tracker::WaterTracker) is built.

use crate::category::{Color, UsageCategory};
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};

/// Layout, palette and seed data for one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Base pie radius used for drawing and hit-testing
    pub radius: f64,
    /// Extra distance beyond the radius that still counts as a wedge tap
    pub hit_slack: f64,
    /// Radius added to the highlighted wedge
    pub highlight_increment: f64,
    /// Outline drawn between wedges
    pub wedge_outline: Color,
    pub wedge_outline_width: f64,
    /// Colors handed out round-robin to added categories
    pub palette: Vec<Color>,
    /// Used if the palette lookup ever comes up empty
    pub fallback_color: Color,
    /// Plot padding for the weekly line chart
    pub line_padding: f64,
    /// Plot padding for the daily bar chart
    pub bar_padding: f64,
    /// Categories present at startup
    pub seed: Vec<UsageCategory>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 320.0,
            radius: 120.0,
            hit_slack: 15.0,
            highlight_increment: 8.0,
            wedge_outline: Color::from("rgba(255,255,255,0.9)"),
            wedge_outline_width: 3.0,
            palette: ["#b29bff", "#f78fb3", "#9be7ff", "#a3e5ff", "#ffc4e1"]
                .into_iter()
                .map(Color::from)
                .collect(),
            fallback_color: Color::from("#cccccc"),
            line_padding: 40.0,
            bar_padding: 50.0,
            seed: vec![
                UsageCategory::new("Shower", 40.0, "#6fb3ff"),
                UsageCategory::new("Kitchen", 25.0, "#7ee0c8"),
                UsageCategory::new("Laundry", 20.0, "#ffd27f"),
                UsageCategory::new("Outdoor / Other", 15.0, "#ff9f9a"),
            ],
        }
    }
}

impl ChartConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ChartConfig =
            serde_json::from_str(json).map_err(|e| TrackerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Pie center in canvas coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Reject configurations that would break geometry or category invariants.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("radius", self.radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TrackerError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(self.hit_slack.is_finite() && self.hit_slack >= 0.0) {
            return Err(TrackerError::Config(format!(
                "hit_slack must not be negative, got {}",
                self.hit_slack
            )));
        }
        if self.palette.is_empty() {
            return Err(TrackerError::Config("palette must not be empty".to_string()));
        }
        for (i, category) in self.seed.iter().enumerate() {
            if category.label().trim().is_empty() {
                return Err(TrackerError::Config(format!("seed category {} has an empty label", i)));
            }
            if !(category.value().is_finite() && category.value() > 0.0) {
                return Err(TrackerError::Config(format!(
                    "seed category '{}' must have a positive value",
                    category.label()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
        assert_eq!(ChartConfig::default().center(), (160.0, 160.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ChartConfig::from_json_str(r#"{"radius": 90, "hit_slack": 5}"#).unwrap();
        assert_eq!(config.radius, 90.0);
        assert_eq!(config.hit_slack, 5.0);
        assert_eq!(config.seed.len(), 4);
        assert_eq!(config.palette.len(), 5);
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = ChartConfig::from_json_str(r#"{"palette": []}"#).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_seed_value() {
        let json = r##"{"seed": [{"label": "Pool", "value": 0, "color": "#000000"}]}"##;
        assert!(matches!(
            ChartConfig::from_json_str(json),
            Err(TrackerError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ChartConfig::from_json_str("{radius"),
            Err(TrackerError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_zero_radius() {
        let config = ChartConfig {
            radius: 0.0,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
