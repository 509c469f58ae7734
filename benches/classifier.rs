// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_deck::orientation::platform::{Capabilities, CoarseProbe, PermissionPolicy};
use iced_deck::orientation::{CoarseFamily, OrientationClassifier};
use std::hint::black_box;

struct FixedCoarse(CoarseFamily);

impl CoarseProbe for FixedCoarse {
    fn read(&self) -> CoarseFamily {
        self.0
    }
}

fn classifier_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");

    group.bench_function("tilt_updates_with_subscribers", |b| {
        let mut classifier = OrientationClassifier::new(Capabilities {
            primary: None,
            coarse: Box::new(FixedCoarse(CoarseFamily::Portrait)),
            permission: PermissionPolicy::NotRequired,
        });
        let mut disposers = Vec::new();
        for _ in 0..8 {
            disposers.push(classifier.subscribe(|kind| {
                black_box(kind);
            }));
        }

        // Alternate between two quadrants so every event broadcasts.
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let gamma = if flip { 45.0 } else { -45.0 };
            classifier.handle_tilt(black_box(Some(10.0)), black_box(Some(gamma)));
            black_box(classifier.current())
        });
    });

    group.bench_function("coarse_reconciliation", |b| {
        let mut classifier = OrientationClassifier::new(Capabilities {
            primary: None,
            coarse: Box::new(FixedCoarse(CoarseFamily::Portrait)),
            permission: PermissionPolicy::NotRequired,
        });

        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let family = if flip {
                CoarseFamily::Landscape
            } else {
                CoarseFamily::Portrait
            };
            classifier.handle_coarse_change(black_box(family));
            black_box(classifier.current())
        });
    });

    group.finish();
}

criterion_group!(benches, classifier_benchmark);
criterion_main!(benches);
