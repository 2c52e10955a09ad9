use criterion::{Criterion, criterion_group, criterion_main};
use radar_rs::api::{ChartInstance, ChartOptions, Container, ImageFormat};
use radar_rs::animation::AnimationOptions;
use radar_rs::core::{BoundingBox, Category, RadialLayout};
use radar_rs::render::scene_to_svg;
use std::hint::black_box;

fn categories(n: usize) -> Vec<Category> {
    (0..n).map(|i| Category::labeled(format!("Axis {i}"))).collect()
}

fn bench_polygon_for_64(c: &mut Criterion) {
    let layout = RadialLayout::for_size(560.0, 32.0, 64).expect("valid layout");
    let values: Vec<f64> = (0..64).map(|i| (i % 6) as f64).collect();

    c.bench_function("polygon_for_64", |b| {
        b.iter(|| {
            let _ = layout.polygon_for(black_box(&values), black_box(5.0));
        })
    });
}

fn bench_animation_frame_12(c: &mut Criterion) {
    let mut chart = ChartInstance::new(
        Some(Container::new("bench", BoundingBox::square(280.0))),
        categories(12),
        Some(vec![0.0; 12]),
        ChartOptions::comparison(),
    );
    let target: Vec<f64> = (0..12).map(|i| (i % 5) as f64 + 0.5).collect();

    c.bench_function("animation_frame_12", |b| {
        b.iter(|| {
            chart
                .update_data_at(black_box(&target), 0.0)
                .expect("update should succeed");
            if let Some(handle) = chart.pending_frame() {
                chart.on_frame(handle, black_box(400.0));
            }
        })
    });
}

fn bench_vector_export_12(c: &mut Criterion) {
    let chart = ChartInstance::new(
        Some(Container::new("bench", BoundingBox::square(280.0))),
        categories(12),
        Some((0..12).map(|i| (i % 5) as f64).collect()),
        ChartOptions::comparison().with_animation(AnimationOptions::disabled()),
    );
    let scene = chart.scene().expect("scene");

    c.bench_function("scene_to_svg_12", |b| {
        b.iter(|| {
            let _ = scene_to_svg(black_box(scene));
        })
    });
    c.bench_function("export_vector_payload_12", |b| {
        b.iter(|| {
            let _ = chart
                .export_as_image(ImageFormat::Vector)
                .expect("export should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_polygon_for_64,
    bench_animation_frame_12,
    bench_vector_export_12
);
criterion_main!(benches);
