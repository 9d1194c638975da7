use collage_core::prelude::*;
use collage_core::{fit_image, to_json};
use image::{DynamicImage, Rgba, RgbaImage};

fn solid(w: u32, h: u32, px: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

const RED: [u8; 4] = [220, 20, 20, 255];
const BLUE: [u8; 4] = [20, 20, 220, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn fit_always_returns_requested_size() {
    let img = solid(37, 91, RED);
    for (w, h) in [(1, 1), (10, 300), (300, 10), (37, 91), (500, 499)] {
        assert_eq!(fit_image(&img, w, h).dimensions(), (w, h));
    }
}

#[test]
fn fit_center_crops_instead_of_squashing() {
    // left third red, middle third blue, right third red
    let mut rgba = RgbaImage::from_pixel(90, 30, Rgba(RED));
    for y in 0..30 {
        for x in 30..60 {
            rgba.put_pixel(x, y, Rgba(BLUE));
        }
    }
    let fitted = fit_image(&DynamicImage::ImageRgba8(rgba), 30, 30);
    assert!(close(fitted.get_pixel(15, 15).0, BLUE));
}

#[test]
fn grid_collage_paints_cells_over_background() {
    let inputs = vec![
        InputImage {
            key: "red".into(),
            image: solid(64, 64, RED),
        },
        InputImage {
            key: "blue".into(),
            image: solid(40, 40, BLUE),
        },
    ];
    let cfg = LayoutConfig::builder()
        .with_canvas(100, 100)
        .padding(10)
        .strategy(Strategy::Grid)
        .build();
    let out = compose_collage(&inputs, &cfg, Rgba(WHITE)).expect("compose");
    assert_eq!(out.rgba.dimensions(), (100, 100));
    // g = 2, cell = (100 - 30) / 2 = 35
    assert_eq!(out.layout.placements[1].frame, Rect::new(55, 10, 35, 35));
    assert_eq!(out.rgba.get_pixel(5, 5).0, WHITE);
    assert!(close(out.rgba.get_pixel(27, 27).0, RED));
    assert!(close(out.rgba.get_pixel(72, 27).0, BLUE));
    // second row is empty
    assert_eq!(out.rgba.get_pixel(50, 80).0, WHITE);
    assert_eq!(out.stats().placed, 2);
}

#[test]
fn compose_onto_keeps_caller_background() {
    let mut canvas = RgbaImage::from_pixel(120, 60, Rgba([1, 2, 3, 255]));
    let inputs = vec![InputImage {
        key: "only".into(),
        image: solid(10, 5, RED),
    }];
    let cfg = LayoutConfig::builder()
        .with_canvas(120, 60)
        .padding(10)
        .strategy(Strategy::Lanes)
        .build();
    let layout = compose_onto(&mut canvas, &inputs, &cfg).expect("compose");
    assert_eq!(layout.placements[0].frame, Rect::new(0, 10, 120, 40));
    assert_eq!(canvas.get_pixel(0, 0).0, [1, 2, 3, 255]);
    assert!(close(canvas.get_pixel(60, 30).0, RED));
}

#[test]
fn compose_onto_rejects_mismatched_canvas() {
    let mut canvas = RgbaImage::new(50, 50);
    let inputs = vec![InputImage {
        key: "a".into(),
        image: solid(4, 4, RED),
    }];
    let cfg = LayoutConfig::builder().with_canvas(60, 50).build();
    assert!(matches!(
        compose_onto(&mut canvas, &inputs, &cfg),
        Err(CollageError::InvalidInput(_))
    ));
}

#[test]
fn outlines_mark_frame_edges() {
    let inputs = vec![InputImage {
        key: "a".into(),
        image: solid(8, 8, BLUE),
    }];
    let cfg = LayoutConfig::builder()
        .with_canvas(40, 40)
        .padding(5)
        .strategy(Strategy::Grid)
        .outlines(true)
        .build();
    let out = compose_collage(&inputs, &cfg, Rgba(WHITE)).expect("compose");
    assert_eq!(out.rgba.get_pixel(5, 5).0, [255, 0, 0, 255]);
    assert_eq!(out.rgba.get_pixel(34, 34).0, [255, 0, 0, 255]);
    assert!(close(out.rgba.get_pixel(20, 20).0, BLUE));
}

#[test]
fn layout_json_names_placed_and_skipped_images() {
    let cfg = LayoutConfig::builder()
        .with_canvas(100, 100)
        .padding(10)
        .strategy(Strategy::GoldenSplit)
        .build();
    let keys: Vec<String> = (0..8).map(|i| format!("img_{i}.png")).collect();
    let layout = pack_layout(&[(10, 10); 8], &cfg).expect("golden");
    let v = to_json(&layout, &keys);
    assert_eq!(v["strategy"], "golden-split");
    assert_eq!(v["canvas"]["w"], 100);
    assert_eq!(v["placements"][0]["key"], "img_0.png");
    assert_eq!(v["placements"][0]["frame"]["h"], 61);
    assert_eq!(v["skipped"][0]["key"], "img_5.png");
    assert_eq!(v["stats"]["placed"], 5);
}
