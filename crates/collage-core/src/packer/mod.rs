use crate::config::LayoutConfig;
use crate::error::{CollageError, Result};
use crate::model::Layout;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub mod aspect_grid;
pub mod golden;
pub mod grid;
pub mod lanes;

/// A packer computes placements for a set of image sizes on one canvas.
///
/// Implementations must keep every frame inside the canvas and must not produce
/// overlapping frames. Images that cannot be placed are listed in `Layout::skipped`.
pub trait Packer {
    fn pack(&mut self, sizes: &[(u32, u32)]) -> Result<Layout>;
}

/// Validates the config, then rejects empty sets and zero-sized images.
pub(crate) fn check_inputs(cfg: &LayoutConfig, sizes: &[(u32, u32)]) -> Result<()> {
    cfg.validate()?;
    check_sizes(sizes)
}

/// Rejects empty sets and zero-sized images.
pub(crate) fn check_sizes(sizes: &[(u32, u32)]) -> Result<()> {
    if sizes.is_empty() {
        return Err(CollageError::InvalidInput("no images to lay out".into()));
    }
    if let Some((i, (w, h))) = sizes.iter().enumerate().find(|(_, (w, h))| *w == 0 || *h == 0) {
        return Err(CollageError::InvalidInput(format!(
            "image {i} has zero size ({w}x{h})"
        )));
    }
    Ok(())
}

/// RNG for a randomized run: seeded when `cfg.seed` is set, OS entropy otherwise.
pub(crate) fn layout_rng(cfg: &LayoutConfig) -> StdRng {
    match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Visit order over `0..n`: identity, or a shuffled copy when randomizing.
/// The caller's slice is never reordered.
pub(crate) fn visit_order(n: usize, rng: Option<&mut StdRng>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if let Some(rng) = rng {
        order.shuffle(rng);
    }
    order
}

/// `(canvas - (count + 1) * padding) / count`, or None when nothing is left.
pub(crate) fn cell_extent(canvas: u32, count: u32, padding: u32) -> Option<u32> {
    let gaps = (count as u64 + 1) * padding as u64;
    let free = (canvas as u64).checked_sub(gaps)?;
    let cell = free / count as u64;
    if cell == 0 { None } else { Some(cell as u32) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_extent_floors_and_rejects_overfull_padding() {
        assert_eq!(cell_extent(800, 3, 10), Some(253));
        assert_eq!(cell_extent(800, 4, 10), Some(187));
        assert_eq!(cell_extent(30, 2, 10), None);
        assert_eq!(cell_extent(31, 2, 10), None);
        assert_eq!(cell_extent(32, 2, 10), Some(1));
    }

    #[test]
    fn visit_order_is_identity_without_rng() {
        assert_eq!(visit_order(4, None), vec![0, 1, 2, 3]);
    }

    #[test]
    fn seeded_order_is_a_permutation_and_repeatable() {
        let cfg = LayoutConfig::builder().seed(Some(7)).build();
        let a = visit_order(20, Some(&mut layout_rng(&cfg)));
        let b = visit_order(20, Some(&mut layout_rng(&cfg)));
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
