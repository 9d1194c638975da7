use super::{Packer, cell_extent, check_inputs};
use crate::config::{LayoutConfig, Orientation, Strategy};
use crate::error::{CollageError, Result};
use crate::model::{Layout, Rect};

/// One equal-size lane per image, spanning the full cross axis of the canvas.
pub struct LanePacker {
    config: LayoutConfig,
}

impl LanePacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl Packer for LanePacker {
    fn pack(&mut self, sizes: &[(u32, u32)]) -> Result<Layout> {
        check_inputs(&self.config, sizes)?;
        let n = sizes.len() as u32;
        let (cw, ch) = self.config.canvas_size();
        let pad = self.config.padding;
        // Work in (packing axis, cross axis) and map back at the end.
        let (along, across) = match self.config.orientation {
            Orientation::Horizontal => (ch, cw),
            Orientation::Vertical => (cw, ch),
        };
        let lane = cell_extent(along, n, pad).ok_or_else(|| {
            CollageError::InvalidInput(format!(
                "padding {pad} leaves no room for {n} lanes on a {cw}x{ch} canvas"
            ))
        })?;

        let used = n as u64 * (lane + pad) as u64;
        let offset = if self.config.centered && used < along as u64 {
            ((along as u64 - used) / 2) as u32
        } else {
            0
        };

        let mut layout = Layout::new((cw, ch), Strategy::Lanes);
        for i in 0..n {
            let pos = i * (lane + pad) + pad + offset;
            let frame = match self.config.orientation {
                Orientation::Horizontal => Rect::new(0, pos, across, lane),
                Orientation::Vertical => Rect::new(pos, 0, lane, across),
            };
            layout.place(i as usize, frame);
        }
        Ok(layout)
    }
}
