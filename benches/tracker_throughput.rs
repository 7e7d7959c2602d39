//! Touch Session Tracker Benchmarks
//!
//! Measures classification throughput for long-press, drag and multi-finger
//! streams across a growing number of concurrently active devices.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use touch_gestured::input::{TouchContact, TouchSessionTracker, TrackerConfig};

/// Interleaved stream of one full session per device
fn generate_stream(devices: usize, motions: usize, step_px: f64) -> Vec<TouchContact> {
    let ids: Vec<String> = (0..devices).map(|d| format!("dev{}", d)).collect();
    let mut stream = Vec::with_capacity(devices * (motions + 2));

    for id in &ids {
        stream.push(TouchContact::down(id.as_str(), 0, 100.0, 100.0));
    }
    for m in 1..=motions {
        let offset = m as f64 * step_px;
        for id in &ids {
            stream.push(TouchContact::motion(
                id.as_str(),
                (m * 20) as u64,
                100.0 + offset,
                100.0,
            ));
        }
    }
    for id in &ids {
        stream.push(TouchContact::up(id.as_str(), ((motions + 1) * 20) as u64, 100.0, 100.0));
    }

    stream
}

fn bench_single_finger(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_single_finger");

    // step 0.1px stays under the drag threshold (long-press path),
    // step 5px crosses it on the third motion (drag path)
    for (label, step) in [("long_press", 0.1), ("drag", 5.0)] {
        for devices in [1usize, 8, 64] {
            let stream = generate_stream(devices, 32, step);
            group.throughput(Throughput::Elements(stream.len() as u64));

            group.bench_with_input(
                BenchmarkId::new(label, devices),
                &stream,
                |b, stream| {
                    b.iter(|| {
                        let mut tracker = TouchSessionTracker::new(TrackerConfig::default());
                        for contact in stream {
                            black_box(tracker.handle(contact.clone()));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_multi_finger(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_multi_finger");

    for fingers in [2usize, 3, 4] {
        let mut stream = Vec::new();
        for f in 0..fingers {
            stream.push(TouchContact::down("dev0", f as u64, 100.0 + f as f64 * 40.0, 100.0));
        }
        for m in 1..=32u64 {
            stream.push(TouchContact::motion("dev0", 10 + m * 10, 100.0, 100.0 + m as f64));
        }
        stream.push(TouchContact::up("dev0", 400, 100.0, 132.0));

        group.throughput(Throughput::Elements(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fingers), &stream, |b, stream| {
            b.iter(|| {
                let mut tracker = TouchSessionTracker::new(TrackerConfig::default());
                for contact in stream {
                    black_box(tracker.handle(contact.clone()));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_finger, bench_multi_finger);
criterion_main!(benches);
