//! Core library for arranging images on a fixed-size collage canvas.
//!
//! - Strategies: Grid (square / canvas-aware), Lanes (rows or columns), GoldenSplit
//!   (recursive φ subdivision), AspectGrid (aspect-preserving lanes with tolerance), Auto
//! - `pack_layout` works on `(width, height)` pairs and returns placements only
//! - `compose_onto` / `compose_collage` fit (center-crop + Lanczos3) and paste images
//! - Data model is serde-serializable; `to_json` exports a layout with stats.
//!
//! Quick example:
//! ```ignore
//! use image::{ImageReader, Rgba};
//! use collage_core::{InputImage, LayoutConfig, Strategy, compose_collage};
//! # fn main() -> anyhow::Result<()> {
//! let inputs = vec![
//!   InputImage { key: "a".into(), image: ImageReader::open("a.jpg")?.decode()? },
//!   InputImage { key: "b".into(), image: ImageReader::open("b.jpg")?.decode()? },
//! ];
//! let cfg = LayoutConfig::builder().with_canvas(800, 800).padding(10).strategy(Strategy::Auto).build();
//! let out = compose_collage(&inputs, &cfg, Rgba([255, 255, 255, 255]))?;
//! out.rgba.save("collage.png")?;
//! # Ok(()) }
//! ```

pub mod auto;
pub mod classify;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use auto::*;
pub use classify::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::Packer;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `collage_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::classify::{Classification, ImageSetKind, Shape, classify};
    pub use crate::config::{
        LayoutConfig, LayoutConfigBuilder, MixedFallback, Orientation, Strategy,
    };
    pub use crate::error::{CollageError, Result};
    pub use crate::model::{Layout, LayoutStats, Placement, Rect};
    pub use crate::packer::Packer;
    pub use crate::{CollageOutput, InputImage, compose_collage, compose_onto, pack_layout};
}
