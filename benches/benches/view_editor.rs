// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_view_editor`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::vec::Vec;

use kurbo::{Point, Size, Vec2};
use understory_gesture::TouchEvent;
use understory_view_editor::boundary::position_correction;
use understory_view_editor::crop::crop_region;
use understory_view_editor::{
    Capabilities, CropConvention, TransformState, ViewEditor, ViewportConfig,
};

fn config() -> ViewportConfig {
    ViewportConfig::new(Size::new(4000.0, 3000.0), Size::new(800.0, 600.0))
        .with_max_zoom_scale(2.0)
        .with_capability(Capabilities::ROTATE, true)
}

fn mounted() -> ViewEditor {
    let mut editor = ViewEditor::new(config()).expect("valid config");
    editor.mount(0);
    editor
}

fn pinch(n: usize) -> Vec<TouchEvent> {
    let center = Point::new(400.0, 300.0);
    let mut out = Vec::with_capacity(n + 2);
    out.push(TouchEvent::start(
        [center - Vec2::new(40.0, 0.0), center + Vec2::new(40.0, 0.0)],
        0,
    ));
    for i in 1..=n {
        let t = i as f64;
        let arm = Vec2::from_angle(t * 0.005) * (40.0 + 2.0 * t);
        out.push(TouchEvent::moved([center - arm, center + arm], i as u64 * 8));
    }
    out.push(TouchEvent::end(n as u64 * 8 + 8));
    out
}

fn bench_editor(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_editor/gesture");
    for &n in &[16_usize, 256, 2048] {
        let events = pinch(n);
        group.bench_function(BenchmarkId::new("pinch_and_settle", n), |b| {
            b.iter_batched(
                mounted,
                |mut editor| {
                    for event in &events {
                        black_box(editor.handle_touch(event));
                    }
                    let mut now = n as u64 * 8 + 8;
                    while editor.is_animating() {
                        now += 16;
                        black_box(editor.tick(now));
                    }
                    editor
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();

    let cfg = config();
    let mut state = TransformState::new(0.7);
    state.set_offset(Vec2::new(-900.0, 150.0));
    c.bench_function("view_editor/position_correction", |b| {
        b.iter(|| position_correction(black_box(state.pan()), black_box(0.7), &cfg));
    });
    c.bench_function("view_editor/crop_region/viewport_inverse", |b| {
        b.iter(|| crop_region(black_box(&state), &cfg, CropConvention::ViewportInverse));
    });
    c.bench_function("view_editor/crop_region/capture_space", |b| {
        b.iter(|| crop_region(black_box(&state), &cfg, CropConvention::CaptureSpace));
    });
}

criterion_group!(benches, bench_editor);
criterion_main!(benches);
