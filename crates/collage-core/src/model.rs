use crate::config::Strategy;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Returns true if `r` lies entirely inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x
            && r.y >= self.y
            && r.x as u64 + r.w as u64 <= self.x as u64 + self.w as u64
            && r.y as u64 + r.h as u64 <= self.y as u64 + self.h as u64
    }
    /// Returns true if the two rectangles share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        let a_x2 = self.x as u64 + self.w as u64;
        let a_y2 = self.y as u64 + self.h as u64;
        let b_x2 = r.x as u64 + r.w as u64;
        let b_y2 = r.y as u64 + r.h as u64;
        !((self.x as u64) >= b_x2
            || (r.x as u64) >= a_x2
            || (self.y as u64) >= b_y2
            || (r.y as u64) >= a_y2)
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
}

/// One placed image: `index` refers to the caller's input order, `frame` is the
/// fitted box on the canvas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub frame: Rect,
}

/// Result of a layout run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    /// Canvas size `(width, height)` the layout was computed for.
    pub canvas: (u32, u32),
    /// Strategy that actually produced the placements (never `Auto`).
    pub strategy: Strategy,
    /// Placements in paste order.
    pub placements: Vec<Placement>,
    /// Input indices that were not placed.
    pub skipped: Vec<usize>,
}

impl Layout {
    pub(crate) fn new(canvas: (u32, u32), strategy: Strategy) -> Self {
        Self {
            canvas,
            strategy,
            placements: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn place(&mut self, index: usize, frame: Rect) {
        debug_assert!(
            Rect::new(0, 0, self.canvas.0, self.canvas.1).contains(&frame),
            "frame {frame:?} leaves the {:?} canvas",
            self.canvas
        );
        self.placements.push(Placement { index, frame });
    }

    /// Looks up the placement of input `index`, if it was placed.
    pub fn placement_of(&self, index: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.index == index)
    }

    /// Computes coverage statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let canvas_area = self.canvas.0 as u64 * self.canvas.1 as u64;
        let covered_area: u64 = self.placements.iter().map(|p| p.frame.area()).sum();
        let coverage = if canvas_area > 0 {
            covered_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        LayoutStats {
            placed: self.placements.len(),
            skipped: self.skipped.len(),
            canvas_area,
            covered_area,
            coverage,
        }
    }
}

/// Statistics about how much of the canvas a layout covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of images placed on the canvas.
    pub placed: usize,
    /// Number of images dropped or skipped.
    pub skipped: usize,
    pub canvas_area: u64,
    /// Sum of placed frame areas.
    pub covered_area: u64,
    /// covered_area / canvas_area (0.0 to 1.0).
    pub coverage: f64,
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {}, Skipped: {}, Coverage: {:.2}%, Canvas Area: {} px², Covered Area: {} px²",
            self.placed,
            self.skipped,
            self.coverage * 100.0,
            self.canvas_area,
            self.covered_area,
        )
    }
}
