//! Configuration types for timeline layout and animation planning.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and animation settings.
//! - [`LayoutConfig`] - Spacing and collision parameters shared by every style.
//! - [`AnimationConfig`] - Hold times and easing for frame planning.
//!
//! # Example
//!
//! ```
//! # use almanac::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().margin(), 40.0);
//! assert_eq!(config.layout().max_levels(), 6);
//! ```

use serde::Deserialize;

use crate::animation::Easing;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Animation configuration section.
    #[serde(default)]
    animation: AnimationConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, animation: AnimationConfig) -> Self {
        Self { layout, animation }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the animation configuration.
    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }
}

/// Spacing and collision parameters for the layout engine.
///
/// Distances are in pixels. Compact mode scales `level_spacing`, `min_gap`
/// and `min_card_height` by `compact_factor`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    margin: f32,
    title_height: f32,
    region_gap: f32,
    marker_size: f32,
    label_height: f32,
    description_height: f32,
    min_gap: f32,
    max_levels: usize,
    level_spacing: f32,
    label_width: f32,
    density_label_width: f32,
    description_density_limit: f32,
    min_card_height: f32,
    padding_units: u32,
    compact_factor: f32,
}

impl LayoutConfig {
    /// Sets the number of label levels available to collision resolution
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Sets the scale padding, in units, added at each end of the range
    pub fn with_padding_units(mut self, padding_units: u32) -> Self {
        self.padding_units = padding_units;
        self
    }

    pub fn with_min_gap(mut self, min_gap: f32) -> Self {
        self.min_gap = min_gap;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Canvas margin on every side
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Height of the title region when titles are shown
    pub fn title_height(&self) -> f32 {
        self.title_height
    }

    /// Gap between stacked regions
    pub fn region_gap(&self) -> f32 {
        self.region_gap
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn label_height(&self) -> f32 {
        self.label_height
    }

    pub fn description_height(&self) -> f32 {
        self.description_height
    }

    /// Minimum clearance between neighbouring labels and cards
    pub fn min_gap(&self) -> f32 {
        self.min_gap
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Vertical distance between stacked label levels
    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    /// Label width assumed by level assignment
    pub fn label_width(&self) -> f32 {
        self.label_width
    }

    /// Label width assumed by the density estimate
    pub fn density_label_width(&self) -> f32 {
        self.density_label_width
    }

    /// Highest density at which descriptions are still shown
    pub fn description_density_limit(&self) -> f32 {
        self.description_density_limit
    }

    /// Height reserved for a vertical-style card without a description
    pub fn min_card_height(&self) -> f32 {
        self.min_card_height
    }

    pub fn padding_units(&self) -> u32 {
        self.padding_units
    }

    pub fn compact_factor(&self) -> f32 {
        self.compact_factor
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 40.0,
            title_height: 60.0,
            region_gap: 10.0,
            marker_size: 16.0,
            label_height: 24.0,
            description_height: 18.0,
            min_gap: 15.0,
            max_levels: 6,
            level_spacing: 50.0,
            label_width: 150.0,
            density_label_width: 120.0,
            description_density_limit: 0.3,
            min_card_height: 80.0,
            padding_units: 1,
            compact_factor: 0.6,
        }
    }
}

/// Hold times and easing used when planning animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    hold_start: f32,
    hold_end: f32,
    easing: Easing,
}

impl AnimationConfig {
    pub fn new(hold_start: f32, hold_end: f32, easing: Easing) -> Self {
        Self {
            hold_start,
            hold_end,
            easing,
        }
    }

    /// Seconds the first frame is held before events appear
    pub fn hold_start(&self) -> f32 {
        self.hold_start
    }

    /// Seconds the final frame is held
    pub fn hold_end(&self) -> f32 {
        self.hold_end
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hold_start: 0.5,
            hold_end: 1.0,
            easing: Easing::EaseOut,
        }
    }
}
