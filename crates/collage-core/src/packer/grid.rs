use super::{Packer, cell_extent, check_inputs};
use crate::config::{LayoutConfig, Strategy};
use crate::error::{CollageError, Result};
use crate::model::{Layout, Rect};

/// Places every image into one cell of a rows × cols grid.
///
/// Square canvases use a `g × g` grid with `g = ceil(sqrt(n))` and square cells.
/// Other canvases orient the grid along the longer canvas side; with `centered`
/// the cells become squares and the block is centered on both axes.
pub struct GridPacker {
    config: LayoutConfig,
}

/// Grid geometry resolved for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub cols: u32,
    pub rows: u32,
    pub cell_w: u32,
    pub cell_h: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl GridGeometry {
    /// Frame of cell `idx` in row-major order.
    pub fn cell(&self, idx: u32, padding: u32) -> Rect {
        let col = idx % self.cols;
        let row = idx / self.cols;
        Rect::new(
            col * (self.cell_w + padding) + padding + self.offset_x,
            row * (self.cell_h + padding) + padding + self.offset_y,
            self.cell_w,
            self.cell_h,
        )
    }
}

/// Smallest `g` with `g * g >= n`.
pub(crate) fn ceil_sqrt(n: u32) -> u32 {
    let mut g = (n as f64).sqrt() as u32;
    while (g as u64) * (g as u64) < n as u64 {
        g += 1;
    }
    while g > 1 && ((g - 1) as u64) * ((g - 1) as u64) >= n as u64 {
        g -= 1;
    }
    g
}

impl GridPacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Resolves grid dimensions, cell size and centering offsets for `n` images.
    pub fn geometry(&self, n: u32) -> Result<GridGeometry> {
        let (cw, ch) = self.config.canvas_size();
        let pad = self.config.padding;
        let no_room = || {
            CollageError::InvalidInput(format!(
                "padding {pad} leaves no room for {n} grid cells on a {cw}x{ch} canvas"
            ))
        };
        if n == 0 {
            return Err(CollageError::InvalidInput("no images to lay out".into()));
        }

        if cw == ch {
            let g = ceil_sqrt(n);
            let cell = cell_extent(cw, g, pad).ok_or_else(no_room)?;
            return Ok(GridGeometry {
                cols: g,
                rows: g,
                cell_w: cell,
                cell_h: cell,
                offset_x: 0,
                offset_y: 0,
            });
        }

        let mut cols = ceil_sqrt(n);
        let mut rows = n.div_ceil(cols);
        if (cw > ch && cols < rows) || (cw < ch && cols > rows) {
            std::mem::swap(&mut cols, &mut rows);
        }
        let mut cell_w = cell_extent(cw, cols, pad).ok_or_else(no_room)?;
        let mut cell_h = cell_extent(ch, rows, pad).ok_or_else(no_room)?;
        let (mut offset_x, mut offset_y) = (0, 0);
        if self.config.centered {
            let cell = cell_w.min(cell_h);
            cell_w = cell;
            cell_h = cell;
            offset_x = (cw - block_extent(cols, cell, pad)) / 2;
            offset_y = (ch - block_extent(rows, cell, pad)) / 2;
        }
        Ok(GridGeometry {
            cols,
            rows,
            cell_w,
            cell_h,
            offset_x,
            offset_y,
        })
    }
}

/// Extent of `count` cells plus the padding before, between and after them.
fn block_extent(count: u32, cell: u32, padding: u32) -> u32 {
    count * cell + (count + 1) * padding
}

impl Packer for GridPacker {
    fn pack(&mut self, sizes: &[(u32, u32)]) -> Result<Layout> {
        check_inputs(&self.config, sizes)?;
        let geo = self.geometry(sizes.len() as u32)?;
        let mut layout = Layout::new(self.config.canvas_size(), Strategy::Grid);
        for idx in 0..sizes.len() {
            layout.place(idx, geo.cell(idx as u32, self.config.padding));
        }
        Ok(layout)
    }
}
