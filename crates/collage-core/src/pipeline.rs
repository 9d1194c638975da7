use crate::auto::packer_for;
use crate::compositing::paste_rgba;
use crate::config::LayoutConfig;
use crate::error::{CollageError, Result};
use crate::model::{Layout, LayoutStats};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// In-memory image to arrange (key + decoded image).
pub struct InputImage {
    pub key: String,
    pub image: DynamicImage,
}

/// Composed canvas and the layout that produced it.
pub struct CollageOutput {
    pub layout: Layout,
    pub rgba: RgbaImage,
}

impl CollageOutput {
    /// Convenience method that delegates to `layout.stats()`.
    pub fn stats(&self) -> LayoutStats {
        self.layout.stats()
    }
}

/// `(width, height)` of every input, in input order.
pub fn sizes_of(inputs: &[InputImage]) -> Vec<(u32, u32)> {
    inputs
        .iter()
        .map(|i| (i.image.width(), i.image.height()))
        .collect()
}

#[instrument(skip_all, fields(images = sizes.len(), strategy = ?cfg.strategy))]
/// Computes placements for `sizes` without touching pixel data.
///
/// Notes:
/// - With `randomize = false` the result depends only on `sizes` and `cfg`.
/// - `Strategy::Auto` resolves to a concrete strategy; see `auto::select`.
pub fn pack_layout(sizes: &[(u32, u32)], cfg: &LayoutConfig) -> Result<Layout> {
    cfg.validate()?;
    packer_for(cfg.clone()).pack(sizes)
}

/// Crop-and-resize `image` to exactly `w`×`h`, keeping the center and the aspect ratio.
pub fn fit_image(image: &DynamicImage, w: u32, h: u32) -> RgbaImage {
    let fitted = image.resize_to_fill(w, h, FilterType::Lanczos3).to_rgba8();
    if fitted.dimensions() == (w, h) {
        fitted
    } else {
        imageops::resize(&fitted, w, h, FilterType::Lanczos3)
    }
}

#[instrument(skip_all, fields(images = inputs.len(), strategy = ?cfg.strategy))]
/// Lays out `inputs` and pastes the fitted images onto `canvas` in placement order.
///
/// The canvas must already have the configured size; its existing pixels act as
/// the background.
pub fn compose_onto(
    canvas: &mut RgbaImage,
    inputs: &[InputImage],
    cfg: &LayoutConfig,
) -> Result<Layout> {
    if canvas.dimensions() != cfg.canvas_size() {
        let (w, h) = canvas.dimensions();
        return Err(CollageError::InvalidInput(format!(
            "canvas is {w}x{h} but the layout expects {}x{}",
            cfg.canvas_width, cfg.canvas_height
        )));
    }
    let layout = pack_layout(&sizes_of(inputs), cfg)?;

    #[cfg(feature = "parallel")]
    let tiles: Vec<RgbaImage> = layout
        .placements
        .par_iter()
        .map(|p| fit_image(&inputs[p.index].image, p.frame.w, p.frame.h))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let tiles: Vec<RgbaImage> = layout
        .placements
        .iter()
        .map(|p| fit_image(&inputs[p.index].image, p.frame.w, p.frame.h))
        .collect();

    for (p, tile) in layout.placements.iter().zip(&tiles) {
        paste_rgba(tile, canvas, p.frame.x, p.frame.y, cfg.outlines);
    }
    Ok(layout)
}

/// Creates a canvas filled with `background` and composes `inputs` onto it.
pub fn compose_collage(
    inputs: &[InputImage],
    cfg: &LayoutConfig,
    background: Rgba<u8>,
) -> Result<CollageOutput> {
    cfg.validate()?;
    let mut rgba = RgbaImage::from_pixel(cfg.canvas_width, cfg.canvas_height, background);
    let layout = compose_onto(&mut rgba, inputs, cfg)?;
    Ok(CollageOutput { layout, rgba })
}
