use serde::Deserialize;
use std::path::Path;

use crate::models::palette::ColourMap;
use crate::plot::PlotOptions;

/// Display configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Invert the plot palette for light terminal backgrounds
    pub white_background: bool,

    /// Colour ramp used for scalar images
    pub colourmap: ColourMap,

    /// Number of entries in the colour ramp
    pub colourmap_size: u16,

    /// Plot canvas and axis defaults
    pub plot: PlotConfig,
}

/// Plot defaults
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,

    /// Fraction of the data span added around inferred axis limits
    pub expand_by: f32,

    /// Reserve margins for grid labels
    pub axis_labels: bool,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            white_background: false,
            colourmap: ColourMap::Gray,
            colourmap_size: 101,
            plot: PlotConfig::default(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            expand_by: 0.1,
            axis_labels: true,
        }
    }
}

impl GraphicsConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file cannot be read or parsed.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            white_background: self.white_background,
            expand_by: self.plot.expand_by,
            axis_labels: self.plot.axis_labels,
        }
    }
}
