use super::{Packer, check_inputs, layout_rng, visit_order};
use crate::config::{LayoutConfig, Strategy};
use crate::error::Result;
use crate::model::{Layout, Rect};
use rand::Rng;
use tracing::debug;

/// (1 + √5) / 2
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Unconsumed part of the canvas. Signed so that the final shrink may go
/// below zero, which is how exhaustion is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingArea {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl WorkingArea {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width as i64,
            height: height as i64,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalSweep {
    /// Place at the left edge of the working area, then move the area's left edge right.
    RightToLeft,
    /// Place flush with the right edge of the working area.
    LeftToRight,
}

impl HorizontalSweep {
    pub fn toggle(self) -> Self {
        match self {
            Self::RightToLeft => Self::LeftToRight,
            Self::LeftToRight => Self::RightToLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalSweep {
    /// Place at the top edge of the working area, then move the area's top edge down.
    BottomToTop,
    /// Place flush with the bottom edge of the working area.
    TopToBottom,
}

impl VerticalSweep {
    pub fn toggle(self) -> Self {
        match self {
            Self::BottomToTop => Self::TopToBottom,
            Self::TopToBottom => Self::BottomToTop,
        }
    }
}

/// Current sweep direction per axis. Each flips every time its axis is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub horizontal: HorizontalSweep,
    pub vertical: VerticalSweep,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            horizontal: HorizontalSweep::RightToLeft,
            vertical: VerticalSweep::BottomToTop,
        }
    }
}

/// One golden split: the frame to fill and the working area left afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub frame: Rect,
    pub area: WorkingArea,
}

/// Splits the longer side of `area` at `1/φ` and returns the cut-off frame.
///
/// Returns None when the area is exhausted or the split would be 0 px wide.
pub fn step(area: WorkingArea, sweep: &mut Sweep, padding: u32) -> Option<Step> {
    if area.is_exhausted() {
        return None;
    }
    let pad = padding as i64;
    let mut next = area;
    // area is non-empty and never leaves the canvas, so all casts below stay in range
    let frame = if area.width > area.height {
        let w = (area.width as f64 / GOLDEN_RATIO).floor() as i64;
        if w <= 0 {
            return None;
        }
        let x = match sweep.horizontal {
            HorizontalSweep::RightToLeft => {
                next.x += w + pad;
                area.x
            }
            HorizontalSweep::LeftToRight => area.x + area.width - w,
        };
        sweep.horizontal = sweep.horizontal.toggle();
        next.width -= w + pad;
        Rect::new(x as u32, area.y as u32, w as u32, area.height as u32)
    } else {
        let h = (area.height as f64 / GOLDEN_RATIO).floor() as i64;
        if h <= 0 {
            return None;
        }
        let y = match sweep.vertical {
            VerticalSweep::BottomToTop => {
                next.y += h + pad;
                area.y
            }
            VerticalSweep::TopToBottom => area.y + area.height - h,
        };
        sweep.vertical = sweep.vertical.toggle();
        next.height -= h + pad;
        Rect::new(area.x as u32, y as u32, area.width as u32, h as u32)
    };
    Some(Step { frame, area: next })
}

/// Recursive golden-ratio subdivision, one image per split.
///
/// Images left over once the working area is exhausted are reported as skipped.
pub struct GoldenSplitPacker {
    config: LayoutConfig,
}

impl GoldenSplitPacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl Packer for GoldenSplitPacker {
    fn pack(&mut self, sizes: &[(u32, u32)]) -> Result<Layout> {
        check_inputs(&self.config, sizes)?;
        let mut sweep = Sweep::default();
        let order = if self.config.randomize {
            let mut rng = layout_rng(&self.config);
            if rng.gen_bool(0.5) {
                sweep.horizontal = sweep.horizontal.toggle();
            }
            if rng.gen_bool(0.5) {
                sweep.vertical = sweep.vertical.toggle();
            }
            visit_order(sizes.len(), Some(&mut rng))
        } else {
            visit_order(sizes.len(), None)
        };

        let (cw, ch) = self.config.canvas_size();
        let mut layout = Layout::new((cw, ch), Strategy::GoldenSplit);
        let mut area = WorkingArea::full(cw, ch);
        for (pos, &idx) in order.iter().enumerate() {
            match step(area, &mut sweep, self.config.padding) {
                Some(s) => {
                    layout.place(idx, s.frame);
                    area = s.area;
                }
                None => {
                    let dropped = &order[pos..];
                    debug!(
                        placed = pos,
                        dropped = dropped.len(),
                        "working area exhausted, stopping"
                    );
                    layout.skipped.extend_from_slice(dropped);
                    break;
                }
            }
        }
        Ok(layout)
    }
}
