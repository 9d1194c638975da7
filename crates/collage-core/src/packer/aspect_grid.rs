use super::{Packer, check_inputs, layout_rng, visit_order};
use crate::config::{LayoutConfig, Strategy};
use crate::error::Result;
use crate::model::{Layout, Rect};
use tracing::debug;

/// Which way lanes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneAxis {
    /// Lanes are rows of fixed height; the cursor moves right, then wraps down.
    Rows,
    /// Lanes are columns of fixed width; the cursor moves down, then wraps right.
    Columns,
}

/// Aspect-preserving lanes.
///
/// Every image is scaled by `scaling_factor`. The first visited image fixes the
/// lane axis (columns if it is portrait, rows otherwise) and the lane thickness.
/// Later images whose cross dimension differs from that thickness by more than
/// `tolerance` pixels are skipped, as are images that no longer fit. Each image is
/// visited exactly once, so a run takes at most `n` steps.
pub struct AspectGridPacker {
    config: LayoutConfig,
}

impl AspectGridPacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn scaled(&self, (w, h): (u32, u32)) -> (u32, u32) {
        let f = self.config.scaling_factor;
        let s = |v: u32| ((v as f64 * f).floor().min(u32::MAX as f64) as u32).max(1);
        (s(w), s(h))
    }
}

impl Packer for AspectGridPacker {
    fn pack(&mut self, sizes: &[(u32, u32)]) -> Result<Layout> {
        check_inputs(&self.config, sizes)?;
        let order = if self.config.randomize {
            visit_order(sizes.len(), Some(&mut layout_rng(&self.config)))
        } else {
            visit_order(sizes.len(), None)
        };

        let (cw, ch) = self.config.canvas_size();
        let pad = self.config.padding as u64;
        let tolerance = self.config.tolerance;

        let (fw, fh) = self.scaled(sizes[order[0]]);
        let axis = if fw < fh {
            LaneAxis::Columns
        } else {
            LaneAxis::Rows
        };
        // (length of a lane, extent available for stacking lanes, lane thickness)
        let (lane_len, stack_len, thickness) = match axis {
            LaneAxis::Rows => (cw as u64, ch as u64, fh),
            LaneAxis::Columns => (ch as u64, cw as u64, fw),
        };
        let thick = thickness as u64;

        let mut layout = Layout::new((cw, ch), Strategy::AspectGrid);
        let mut along = pad;
        let mut stack = pad;
        for &idx in &order {
            let (sw, sh) = self.scaled(sizes[idx]);
            let (extent, cross) = match axis {
                LaneAxis::Rows => (sw, sh),
                LaneAxis::Columns => (sh, sw),
            };
            if cross.abs_diff(thickness) > tolerance {
                debug!(index = idx, cross, thickness, tolerance, "aspect mismatch, skipping");
                layout.skipped.push(idx);
                continue;
            }
            let ext = extent as u64;
            if pad + ext + pad > lane_len {
                debug!(index = idx, extent, "longer than a lane, skipping");
                layout.skipped.push(idx);
                continue;
            }
            // The wrap only sticks once the next lane is known to exist.
            let (at, lane) = if along + ext + pad > lane_len {
                (pad, stack + thick + pad)
            } else {
                (along, stack)
            };
            if lane + thick + pad > stack_len {
                debug!(index = idx, "canvas full, skipping");
                layout.skipped.push(idx);
                continue;
            }
            let frame = match axis {
                LaneAxis::Rows => Rect::new(at as u32, lane as u32, extent, thickness),
                LaneAxis::Columns => Rect::new(lane as u32, at as u32, thickness, extent),
            };
            layout.place(idx, frame);
            along = at + ext + pad;
            stack = lane;
        }
        Ok(layout)
    }
}
