use crate::error::{CollageError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Layout strategies.
/// Key notes:
///   - `Auto` classifies the image set and picks Grid / Lanes / the mixed fallback
///   - `randomize` only affects GoldenSplit (order + sweep directions) and AspectGrid (order)
///   - `tolerance` and `scaling_factor` only affect AspectGrid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Classify the set and dispatch (all square → Grid, all landscape/portrait → Lanes, else fallback).
    Auto,
    /// rows × cols grid of identical cells.
    Grid,
    /// One equal-size lane per image, stacked along one axis.
    Lanes,
    /// Recursive golden-ratio subdivision of the remaining canvas.
    GoldenSplit,
    /// Aspect-preserving lanes with a per-image mismatch tolerance.
    AspectGrid,
}

impl FromStr for Strategy {
    type Err = CollageError;
    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "auto" => Ok(Self::Auto),
            "grid" | "squares" => Ok(Self::Grid),
            "lanes" | "rectangles" => Ok(Self::Lanes),
            "golden-split" | "golden" => Ok(Self::GoldenSplit),
            "aspect-grid" | "keep-aspect" => Ok(Self::AspectGrid),
            other => Err(CollageError::InvalidArgument(format!(
                "unknown strategy: {other}"
            ))),
        }
    }
}

/// Lane stacking axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Lanes are full-width rows stacked top to bottom.
    Horizontal,
    /// Lanes are full-height columns stacked left to right.
    Vertical,
}

impl FromStr for Orientation {
    type Err = CollageError;
    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "horizontal" | "h" | "rows" => Ok(Self::Horizontal),
            "vertical" | "v" | "columns" => Ok(Self::Vertical),
            other => Err(CollageError::InvalidArgument(format!(
                "orientation must be 'horizontal' or 'vertical', got '{other}'"
            ))),
        }
    }
}

/// Strategy used by `Auto` when the set mixes orientations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MixedFallback {
    GoldenSplit,
    /// AspectGrid with a scaling factor that makes total image area match the canvas.
    AspectGrid,
}

impl FromStr for MixedFallback {
    type Err = CollageError;
    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "golden-split" | "golden" => Ok(Self::GoldenSplit),
            "aspect-grid" | "keep-aspect" => Ok(Self::AspectGrid),
            other => Err(CollageError::InvalidArgument(format!(
                "unknown mixed fallback: {other}"
            ))),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Pixels between cells and around the canvas edge.
    pub padding: u32,

    #[serde(default = "default_strategy")]
    pub strategy: Strategy,
    /// Shuffle image order (and sweep directions for GoldenSplit).
    #[serde(default)]
    pub randomize: bool,
    /// Seed for `randomize`. None draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Center the block of cells/lanes when it does not fill the canvas.
    #[serde(default)]
    pub centered: bool,
    #[serde(default = "default_orientation")]
    pub orientation: Orientation,

    /// AspectGrid: multiplier applied to each image's native size.
    #[serde(default = "default_scaling_factor")]
    pub scaling_factor: f64,
    /// AspectGrid: max lane-thickness mismatch in pixels before an image is skipped.
    #[serde(default = "default_tolerance")]
    pub tolerance: u32,
    #[serde(default = "default_mixed_fallback")]
    pub mixed_fallback: MixedFallback,

    /// Draw red outlines around pasted images (debug).
    #[serde(default)]
    pub outlines: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 800,
            padding: 10,
            strategy: default_strategy(),
            randomize: false,
            seed: None,
            centered: false,
            orientation: default_orientation(),
            scaling_factor: default_scaling_factor(),
            tolerance: default_tolerance(),
            mixed_fallback: default_mixed_fallback(),
            outlines: false,
        }
    }
}

impl LayoutConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Canvas dimensions are zero
    /// - `scaling_factor` is not a finite positive number
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(CollageError::InvalidInput(format!(
                "canvas must have a positive area, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(CollageError::InvalidArgument(format!(
                "scaling_factor must be > 0, got {}",
                self.scaling_factor
            )));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }
}

fn default_strategy() -> Strategy {
    Strategy::Auto
}
fn default_orientation() -> Orientation {
    Orientation::Horizontal
}
fn default_scaling_factor() -> f64 {
    1.0
}
fn default_tolerance() -> u32 {
    50
}
fn default_mixed_fallback() -> MixedFallback {
    MixedFallback::GoldenSplit
}

/// Builder for `LayoutConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct LayoutConfigBuilder {
    cfg: LayoutConfig,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: LayoutConfig::default(),
        }
    }
    pub fn with_canvas(mut self, w: u32, h: u32) -> Self {
        self.cfg.canvas_width = w;
        self.cfg.canvas_height = h;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn randomize(mut self, v: bool) -> Self {
        self.cfg.randomize = v;
        self
    }
    pub fn seed(mut self, v: Option<u64>) -> Self {
        self.cfg.seed = v;
        self
    }
    pub fn centered(mut self, v: bool) -> Self {
        self.cfg.centered = v;
        self
    }
    pub fn orientation(mut self, v: Orientation) -> Self {
        self.cfg.orientation = v;
        self
    }
    pub fn scaling_factor(mut self, v: f64) -> Self {
        self.cfg.scaling_factor = v;
        self
    }
    pub fn tolerance(mut self, v: u32) -> Self {
        self.cfg.tolerance = v;
        self
    }
    pub fn mixed_fallback(mut self, v: MixedFallback) -> Self {
        self.cfg.mixed_fallback = v;
        self
    }
    pub fn outlines(mut self, v: bool) -> Self {
        self.cfg.outlines = v;
        self
    }
    pub fn build(self) -> LayoutConfig {
        self.cfg
    }
}

impl LayoutConfig {
    /// Create a fluent builder for `LayoutConfig`.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }
}
