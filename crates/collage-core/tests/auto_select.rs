use collage_core::prelude::*;
use collage_core::select;

fn auto_cfg(w: u32, h: u32) -> LayoutConfig {
    LayoutConfig::builder()
        .with_canvas(w, h)
        .padding(10)
        .strategy(Strategy::Auto)
        .build()
}

#[test]
fn classification_counts_and_aspect_sums() {
    let c = classify(&[(200, 100), (100, 300), (50, 50)], (100, 200)).expect("classify");
    assert_eq!((c.squares, c.landscapes, c.portraits), (1, 1, 1));
    assert_eq!(c.aspect_sum_width, 4.0);
    assert_eq!(c.aspect_sum_height, 5.0);
    assert_eq!(c.elongation(), 1.0);
    assert_eq!(c.total_area, 52_500);
    assert_eq!(c.canvas_area, 20_000);
    assert_eq!(c.kind(), ImageSetKind::Mixed);
    assert!(!c.all_square() && !c.all_landscape() && !c.all_portrait());
}

#[test]
fn classify_rejects_empty_set() {
    assert!(matches!(classify(&[], (10, 10)), Err(CollageError::InvalidInput(_))));
}

#[test]
fn fill_scaling_factor_matches_areas() {
    let c = classify(&[(200, 200), (200, 200)], (400, 200)).expect("classify");
    assert!((c.fill_scaling_factor() - 1.0).abs() < 1e-12);
    let c = classify(&[(100, 100)], (400, 400)).expect("classify");
    assert!((c.fill_scaling_factor() - 4.0).abs() < 1e-12);
}

#[test]
fn all_squares_use_centered_grid() {
    let layout = pack_layout(&[(500, 500); 5], &auto_cfg(800, 800)).expect("auto");
    assert_eq!(layout.strategy, Strategy::Grid);
    assert_eq!(layout.placement_of(4).map(|p| p.frame), Some(Rect::new(273, 273, 253, 253)));
}

#[test]
fn all_landscapes_use_centered_horizontal_lanes() {
    let layout = pack_layout(&[(300, 200); 4], &auto_cfg(400, 800)).expect("auto");
    assert_eq!(layout.strategy, Strategy::Lanes);
    let ys: Vec<u32> = layout.placements.iter().map(|p| p.frame.y).collect();
    assert_eq!(ys, vec![16, 213, 410, 607]);
}

#[test]
fn all_portraits_use_centered_vertical_lanes() {
    let layout = pack_layout(&[(200, 300); 3], &auto_cfg(800, 600)).expect("auto");
    assert_eq!(layout.strategy, Strategy::Lanes);
    // lane = (800 - 40) / 3 = 253, used = 789, offset = 5
    let frames: Vec<Rect> = layout.placements.iter().map(|p| p.frame).collect();
    assert_eq!(
        frames,
        vec![
            Rect::new(15, 0, 253, 600),
            Rect::new(278, 0, 253, 600),
            Rect::new(541, 0, 253, 600),
        ]
    );
}

#[test]
fn mixed_set_falls_back_to_golden_split() {
    let sizes = [(300, 200), (200, 300), (250, 250)];
    let cfg = auto_cfg(800, 800);
    let resolved = select(&sizes, &cfg).expect("select");
    assert_eq!(resolved.strategy, Strategy::GoldenSplit);
    assert!(!resolved.centered);
    let layout = pack_layout(&sizes, &cfg).expect("auto");
    assert_eq!(layout.strategy, Strategy::GoldenSplit);
}

#[test]
fn mixed_set_can_fall_back_to_aspect_grid() {
    let sizes = [(400, 200), (200, 400)];
    let cfg = LayoutConfig {
        mixed_fallback: MixedFallback::AspectGrid,
        ..auto_cfg(400, 400)
    };
    let resolved = select(&sizes, &cfg).expect("select");
    assert_eq!(resolved.strategy, Strategy::AspectGrid);
    // 160000 / 160000
    assert!((resolved.scaling_factor - 1.0).abs() < 1e-12);
    let layout = pack_layout(&sizes, &cfg).expect("auto");
    assert_eq!(layout.strategy, Strategy::AspectGrid);
}

#[test]
fn auto_passes_randomize_through_to_golden_split() {
    let sizes: Vec<(u32, u32)> = (0..8).map(|i| if i % 2 == 0 { (30, 20) } else { (20, 30) }).collect();
    let cfg = LayoutConfig {
        randomize: true,
        seed: Some(3),
        ..auto_cfg(1000, 700)
    };
    let direct = LayoutConfig {
        strategy: Strategy::GoldenSplit,
        ..cfg.clone()
    };
    assert_eq!(
        pack_layout(&sizes, &cfg).expect("auto").placements,
        pack_layout(&sizes, &direct).expect("golden").placements
    );
}
