use crate::classify::{ImageSetKind, classify};
use crate::config::{LayoutConfig, MixedFallback, Orientation, Strategy};
use crate::error::Result;
use crate::model::Layout;
use crate::packer::{
    Packer, aspect_grid::AspectGridPacker, golden::GoldenSplitPacker, grid::GridPacker,
    lanes::LanePacker,
};

/// Classifies the image set and resolves the concrete strategy and config for it.
///
/// - all square → Grid, centered
/// - all landscape → horizontal Lanes, centered
/// - all portrait → vertical Lanes, centered
/// - mixed → `cfg.mixed_fallback` (GoldenSplit keeps `randomize`; AspectGrid gets
///   the fill scaling factor)
pub fn select(sizes: &[(u32, u32)], cfg: &LayoutConfig) -> Result<LayoutConfig> {
    let class = classify(sizes, cfg.canvas_size())?;
    let mut resolved = cfg.clone();
    match class.kind() {
        ImageSetKind::AllSquare => {
            resolved.strategy = Strategy::Grid;
            resolved.centered = true;
        }
        ImageSetKind::AllLandscape => {
            resolved.strategy = Strategy::Lanes;
            resolved.orientation = Orientation::Horizontal;
            resolved.centered = true;
        }
        ImageSetKind::AllPortrait => {
            resolved.strategy = Strategy::Lanes;
            resolved.orientation = Orientation::Vertical;
            resolved.centered = true;
        }
        ImageSetKind::Mixed => match cfg.mixed_fallback {
            MixedFallback::GoldenSplit => resolved.strategy = Strategy::GoldenSplit,
            MixedFallback::AspectGrid => {
                resolved.strategy = Strategy::AspectGrid;
                resolved.scaling_factor = class.fill_scaling_factor();
            }
        },
    }
    Ok(resolved)
}

/// Runs `select` and packs with the chosen strategy.
pub struct AutoPacker {
    config: LayoutConfig,
}

impl AutoPacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl Packer for AutoPacker {
    fn pack(&mut self, sizes: &[(u32, u32)]) -> Result<Layout> {
        self.config.validate()?;
        let resolved = select(sizes, &self.config)?;
        packer_for(resolved).pack(sizes)
    }
}

/// Boxed packer for `cfg.strategy`.
pub fn packer_for(cfg: LayoutConfig) -> Box<dyn Packer> {
    match cfg.strategy {
        Strategy::Auto => Box::new(AutoPacker::new(cfg)),
        Strategy::Grid => Box::new(GridPacker::new(cfg)),
        Strategy::Lanes => Box::new(LanePacker::new(cfg)),
        Strategy::GoldenSplit => Box::new(GoldenSplitPacker::new(cfg)),
        Strategy::AspectGrid => Box::new(AspectGridPacker::new(cfg)),
    }
}
