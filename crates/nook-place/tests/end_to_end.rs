//! Full pipeline: raster -> heatmap (through the cache) -> placement.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use nook_color::Rgb;
use nook_heatmap::{cache_key, Heatmap, HeatmapBuilder, HeatmapCache};
use nook_place::{
    suggest_sequence, AvoidRect, PlacementKind, PlacementOptions, PlacementRequest, Rect, TextBox,
};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;

fn flat_gray() -> Heatmap {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        WIDTH,
        HEIGHT,
        Rgba([128, 128, 128, 255]),
    ));
    HeatmapBuilder::default()
        .build_from_image(&img, WIDTH, HEIGHT)
        .unwrap()
}

/// 16px black/white checkerboard with a white block in the middle.
fn busy_with_quiet_center() -> RgbaImage {
    RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
        if (140..260).contains(&x) && (110..190).contains(&y) {
            Rgba([255, 255, 255, 255])
        } else if (x / 16 + y / 16) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn flat_gray_ties_resolve_to_first_cell() {
    let heatmap = flat_gray();
    assert_eq!((heatmap.width(), heatmap.height()), (384, 288));

    let placement = PlacementRequest::new(&heatmap, 100.0, 40.0, Rgb::WHITE)
        .weights(0.6, 0.4)
        .margin(8.0)
        .suggest();

    assert_eq!(placement.kind, PlacementKind::Placed);
    let breakdown = placement.breakdown.unwrap();
    assert!(breakdown.mean_saliency.abs() < 1e-9);
    assert!(breakdown.contrast_ratio > 3.0);

    // Every cell scores the same on a flat image, so the first grid cell wins.
    assert_eq!((placement.x, placement.y), (8, 8));

    let expected = 0.6 + 0.4 * breakdown.contrast_ratio / 21.0;
    assert!((placement.score - expected).abs() < 1e-9);
}

#[test]
fn avoiding_left_half_moves_box_right() {
    let heatmap = flat_gray();
    let placement = PlacementRequest::new(&heatmap, 100.0, 40.0, Rgb::WHITE)
        .avoid(Rect::new(0.0, 0.0, 200.0, 300.0))
        .suggest();

    assert_eq!(placement.kind, PlacementKind::Placed);
    assert!(placement.x >= 200, "x = {}", placement.x);
    assert!(placement.x + 100 <= WIDTH);
}

#[test]
fn avoiding_whole_canvas_yields_no_candidate() {
    let heatmap = flat_gray();
    let placement = PlacementRequest::new(&heatmap, 100.0, 40.0, Rgb::WHITE)
        .avoid(Rect::new(0.0, 0.0, WIDTH as f64, HEIGHT as f64))
        .suggest();

    assert_eq!(placement.kind, PlacementKind::NoCandidate);
    assert_eq!(placement.score, f64::NEG_INFINITY);
    assert_eq!((placement.x, placement.y), (8, 8));
}

#[test]
fn oversized_box_falls_back_to_margin_corner() {
    let heatmap = flat_gray();
    let placement = PlacementRequest::new(&heatmap, 500.0, 40.0, Rgb::WHITE).suggest();

    assert_eq!(placement.kind, PlacementKind::Fallback);
    assert_eq!((placement.x, placement.y, placement.score), (8, 8, 0.0));
}

#[test]
fn quiet_center_attracts_dark_text() {
    let bytes = encode_png(&busy_with_quiet_center());
    let cache = HeatmapCache::unbounded();
    let builder = HeatmapBuilder::default();
    let heatmap = cache
        .get_or_build_image("checker.png", &bytes, WIDTH, HEIGHT, &builder)
        .unwrap();

    let placement = PlacementRequest::new(&heatmap, 100.0, 40.0, Rgb::BLACK).suggest();

    assert_eq!(placement.kind, PlacementKind::Placed);
    let center_x = placement.x as f64 + 50.0;
    let center_y = placement.y as f64 + 20.0;
    assert!((center_x - 200.0).abs() < 40.0, "center x = {center_x}");
    assert!((center_y - 150.0).abs() < 40.0, "center y = {center_y}");
}

#[test]
fn cached_heatmap_is_reused() {
    let bytes = encode_png(&busy_with_quiet_center());
    let cache = HeatmapCache::unbounded();
    let builder = HeatmapBuilder::default();

    let first = cache
        .get_or_build_image("checker.png", &bytes, WIDTH, HEIGHT, &builder)
        .unwrap();
    // Garbage bytes would fail to decode, so a hit must not rebuild.
    let second = cache
        .get_or_build_image("checker.png", b"garbage", WIDTH, HEIGHT, &builder)
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(cache.contains(&cache_key("checker.png", WIDTH, HEIGHT)));
}

#[test]
fn sequence_places_boxes_without_overlap() {
    let heatmap = flat_gray();
    let boxes = [
        TextBox { width: 120.0, height: 40.0, color: Rgb::WHITE },
        TextBox { width: 120.0, height: 40.0, color: Rgb::WHITE },
        TextBox { width: 120.0, height: 40.0, color: Rgb::WHITE },
    ];
    let existing = [AvoidRect::new(Rect::new(0.0, 0.0, 80.0, 80.0), 4.0)];
    let placements =
        suggest_sequence(&heatmap, &boxes, &PlacementOptions::default(), &existing);

    let rects: Vec<Rect> = placements
        .iter()
        .inspect(|p| assert!(p.is_placed()))
        .map(|p| p.rect(120.0, 40.0))
        .collect();

    for (i, a) in rects.iter().enumerate() {
        assert!(!a.overlaps(&existing[0].rect));
        for b in &rects[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}
