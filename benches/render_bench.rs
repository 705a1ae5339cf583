//! Benchmarks for dashboard rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use guardian_dashboard::controller::render;
use guardian_dashboard::{AlertView, ChildView, DashboardSnapshot, Document, Dom, Scalar, SummaryView};

const CONTAINER: &str = "dashboard-container";

fn create_snapshot(count: usize) -> DashboardSnapshot {
    let children = (0..count)
        .map(|i| ChildView {
            name: Some(Scalar::Text(format!("Child {}", i))),
            status: Some("Active".into()),
            current_app: Some("Minecraft".into()),
            ..Default::default()
        })
        .collect();

    let alerts = (0..count)
        .map(|i| AlertView {
            id: Some(Scalar::from(i as i64)),
            severity: Some("high".into()),
            message: Some("Usage limit exceeded".into()),
            ..Default::default()
        })
        .collect();

    DashboardSnapshot::new(SummaryView::default(), children, alerts)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [10, 100, 1000] {
        let snapshot = create_snapshot(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("apply_{}", size), |b| {
            b.iter(|| {
                let mut doc = Document::new(CONTAINER);
                doc.replace_children(CONTAINER, render::scaffold()).unwrap();
                render::apply(&mut doc, black_box(&snapshot)).unwrap();
                doc
            })
        });

        let mut doc = Document::new(CONTAINER);
        doc.replace_children(CONTAINER, render::scaffold()).unwrap();
        render::apply(&mut doc, &snapshot).unwrap();

        group.bench_function(format!("to_html_{}", size), |b| {
            b.iter(|| black_box(&doc).to_html())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
