// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_gesture`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::vec::Vec;

use kurbo::{Point, Vec2};
use understory_gesture::{GestureTracker, TouchEvent, TwoFingerGeometry};

fn drag_samples(n: usize) -> Vec<TouchEvent> {
    let mut out = Vec::with_capacity(n + 2);
    out.push(TouchEvent::start([Point::new(200.0, 200.0)], 0));
    for i in 1..=n {
        let t = i as f64;
        out.push(TouchEvent::moved(
            [Point::new(200.0 - t, 200.0 + 0.5 * t)],
            i as u64 * 8,
        ));
    }
    out.push(TouchEvent::end(n as u64 * 8 + 8));
    out
}

fn pinch_samples(n: usize) -> Vec<TouchEvent> {
    let mut out = Vec::with_capacity(n + 2);
    let center = Point::new(250.0, 250.0);
    out.push(TouchEvent::start(
        [center - Vec2::new(50.0, 0.0), center + Vec2::new(50.0, 0.0)],
        0,
    ));
    for i in 1..=n {
        let t = i as f64;
        let arm = Vec2::from_angle(t * 0.01) * (50.0 + t);
        out.push(TouchEvent::moved([center - arm, center + arm], i as u64 * 8));
    }
    out.push(TouchEvent::end(n as u64 * 8 + 8));
    out
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/tracker");
    for &n in &[16_usize, 256, 4096] {
        let drag = drag_samples(n);
        group.bench_function(BenchmarkId::new("drag", n), |b| {
            b.iter_batched(
                GestureTracker::default,
                |mut tracker| {
                    for event in &drag {
                        black_box(tracker.handle(event));
                    }
                },
                BatchSize::SmallInput,
            );
        });

        let pinch = pinch_samples(n);
        group.bench_function(BenchmarkId::new("pinch", n), |b| {
            b.iter_batched(
                GestureTracker::default,
                |mut tracker| {
                    for event in &pinch {
                        black_box(tracker.handle(event));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();

    let touches = [Point::new(10.0, 20.0), Point::new(110.0, 70.0)];
    c.bench_function("gesture/two_finger_geometry", |b| {
        b.iter(|| TwoFingerGeometry::from_touches(black_box(&touches)));
    });
}

criterion_group!(benches, bench_tracker);
criterion_main!(benches);
