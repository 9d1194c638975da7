use crate::error::{CollageError, Result};
use serde::{Deserialize, Serialize};

/// Orientation class of a single image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Landscape,
    Portrait,
}

impl Shape {
    pub fn of(w: u32, h: u32) -> Self {
        if h == w {
            Shape::Square
        } else if h > w {
            Shape::Portrait
        } else {
            Shape::Landscape
        }
    }
}

/// Bucket for a whole image set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageSetKind {
    AllSquare,
    AllLandscape,
    AllPortrait,
    Mixed,
}

/// Aggregate shape statistics for an image set against a canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub count: usize,
    pub squares: usize,
    pub landscapes: usize,
    pub portraits: usize,
    /// Each image adds `w/h` when landscape, otherwise 1.
    pub aspect_sum_width: f64,
    /// Each image adds `h/w` when portrait, otherwise 1.
    pub aspect_sum_height: f64,
    pub total_area: u64,
    pub canvas_area: u64,
}

impl Classification {
    pub fn all_square(&self) -> bool {
        self.squares == self.count
    }
    pub fn all_landscape(&self) -> bool {
        self.landscapes == self.count
    }
    pub fn all_portrait(&self) -> bool {
        self.portraits == self.count
    }

    pub fn kind(&self) -> ImageSetKind {
        if self.all_square() {
            ImageSetKind::AllSquare
        } else if self.all_landscape() {
            ImageSetKind::AllLandscape
        } else if self.all_portrait() {
            ImageSetKind::AllPortrait
        } else {
            ImageSetKind::Mixed
        }
    }

    /// How elongated the set is overall: 0 when wide and tall elongation balance out.
    pub fn elongation(&self) -> f64 {
        (self.aspect_sum_width - self.aspect_sum_height).abs()
    }

    /// Uniform scale that makes the summed image area equal the canvas area.
    pub fn fill_scaling_factor(&self) -> f64 {
        (self.canvas_area as f64 / self.total_area as f64).sqrt()
    }
}

/// Classifies `sizes` (`(width, height)` pairs) against a canvas of `canvas` pixels.
pub fn classify(sizes: &[(u32, u32)], canvas: (u32, u32)) -> Result<Classification> {
    if sizes.is_empty() {
        return Err(CollageError::InvalidInput("no images to classify".into()));
    }
    let mut c = Classification {
        count: sizes.len(),
        squares: 0,
        landscapes: 0,
        portraits: 0,
        aspect_sum_width: 0.0,
        aspect_sum_height: 0.0,
        total_area: 0,
        canvas_area: canvas.0 as u64 * canvas.1 as u64,
    };
    for (i, &(w, h)) in sizes.iter().enumerate() {
        if w == 0 || h == 0 {
            return Err(CollageError::InvalidInput(format!(
                "image {i} has zero size ({w}x{h})"
            )));
        }
        c.total_area += w as u64 * h as u64;
        match Shape::of(w, h) {
            Shape::Square => {
                c.squares += 1;
                c.aspect_sum_width += 1.0;
                c.aspect_sum_height += 1.0;
            }
            Shape::Portrait => {
                c.portraits += 1;
                c.aspect_sum_width += 1.0;
                c.aspect_sum_height += h as f64 / w as f64;
            }
            Shape::Landscape => {
                c.landscapes += 1;
                c.aspect_sum_width += w as f64 / h as f64;
                c.aspect_sum_height += 1.0;
            }
        }
    }
    Ok(c)
}
