// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ImageCropper`, alone and driven by a `ViewEditor`.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use kurbo::{Point, Size, Vec2};
use understory_gesture::TouchEvent;
use understory_view_editor::{
    CaptureContext, CaptureError, CropBackend, CropRegion, ViewEditor, ViewportConfig,
};
use understory_view_editor_image::{ImageCropError, ImageCropper};

/// 200x100 PNG: left half red, right half blue.
fn two_tone_png() -> Vec<u8> {
    let img = RgbaImage::from_fn(200, 100, |x, _| {
        if x < 100 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

#[test]
fn crops_the_requested_pixels() {
    let png = two_tone_png();
    let region = CropRegion::new(Point::new(120.0, 10.0), Size::new(40.0, 30.0));
    let out = ImageCropper::default().crop(&png, &region).unwrap();
    let img = decode(&out);
    assert_eq!(img.dimensions(), (40, 30));
    assert!(img.pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
}

#[test]
fn region_outside_the_image_is_an_error() {
    let png = two_tone_png();
    let region = CropRegion::new(Point::new(500.0, 0.0), Size::new(10.0, 10.0));
    let err = ImageCropper::default().crop(&png, &region).unwrap_err();
    assert!(matches!(
        err,
        ImageCropError::OutOfBounds {
            width: 200,
            height: 100,
            ..
        }
    ));
}

#[test]
fn garbage_input_fails_to_decode() {
    let region = CropRegion::new(Point::ORIGIN, Size::new(1.0, 1.0));
    let err = ImageCropper::default()
        .crop(b"not an image", &region)
        .unwrap_err();
    assert!(matches!(err, ImageCropError::Decode(_)));
}

#[test]
fn editor_crops_what_is_visible() {
    // 200x100 content behind a 100x100 viewport, covering: scale 1.
    let config = ViewportConfig::new(Size::new(200.0, 100.0), Size::new(100.0, 100.0))
        .with_capability(understory_view_editor::Capabilities::REQUIRES_MIN_SCALE, true);
    let mut editor = ViewEditor::new(config).unwrap();
    editor.mount(0);

    // Drag left by 100: the blue half fills the viewport.
    editor.handle_touch(&TouchEvent::start([Point::new(150.0, 50.0)], 0));
    editor.handle_touch(&TouchEvent::moved([Point::new(50.0, 50.0)], 16));
    editor.handle_touch(&TouchEvent::end(32));
    assert!(!editor.is_animating());
    assert_eq!(editor.transform().pan(), Vec2::new(-100.0, 0.0));

    let png = two_tone_png();
    let out = editor
        .crop_content(&CaptureContext::default(), &png, &mut ImageCropper::default())
        .unwrap();
    let img = decode(&out);
    assert_eq!(img.dimensions(), (100, 100));
    assert!(img.pixels().all(|p| *p == Rgba([0, 0, 255, 255])));
}

#[test]
fn crop_errors_surface_through_the_editor() {
    let config = ViewportConfig::new(Size::new(200.0, 100.0), Size::new(100.0, 100.0));
    let mut editor = ViewEditor::new(config).unwrap();
    editor.mount(0);
    let err = editor
        .crop_content(&CaptureContext::default(), b"nope", &mut ImageCropper::default())
        .unwrap_err();
    match err {
        CaptureError::Crop(source) => {
            assert!(source.downcast_ref::<ImageCropError>().is_some());
        }
        other => panic!("expected a crop error, got {other:?}"),
    }
}
