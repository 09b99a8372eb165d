use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rastrix::math::{Vec3, Vec4};
use rastrix::mesh::{Face, Mesh, VertexRef};
use rastrix::prelude::*;
use rastrix::render::{fill_spans, triangle_boundary, Fragment, RenderTarget};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn corner(x: i32, y: i32) -> Fragment {
    Fragment {
        x,
        y,
        z: 0.5,
        inv_w: 1.0,
        normal: Vec3::new(0.0, 0.0, 1.0),
        texel: Vec3::ZERO,
    }
}

fn benchmark_triangle_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangle_fill");

    for (name, corners) in [
        ("small", [corner(100, 100), corner(120, 100), corner(110, 120)]),
        ("medium", [corner(100, 100), corner(300, 100), corner(200, 300)]),
        ("large", [corner(50, 50), corner(750, 100), corner(400, 550)]),
    ] {
        group.bench_with_input(BenchmarkId::new("boundary", name), &corners, |b, tri| {
            b.iter(|| triangle_boundary(black_box(*tri)).count());
        });

        group.bench_with_input(
            BenchmarkId::new("boundary_and_fill", name),
            &corners,
            |b, tri| {
                b.iter(|| {
                    let boundary: Vec<_> = triangle_boundary(black_box(*tri)).collect();
                    fill_spans(&boundary).len()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_depth_writes(c: &mut Criterion) {
    c.bench_function("depth_write_full_row", |b| {
        let target = RenderTarget::new(BUFFER_WIDTH, BUFFER_HEIGHT, Color::BLACK);
        b.iter(|| {
            for x in 0..BUFFER_WIDTH as i32 {
                target.test_and_write(black_box(x), 300, 0.5, Color::WHITE);
            }
        });
    });
}

/// A fan disc facing the camera; every face survives culling.
fn disc_mesh(segments: usize) -> Mesh {
    let mut positions = vec![Vec4::point(0.0, 0.0, -5.0)];
    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        positions.push(Vec4::point(angle.cos(), angle.sin(), -5.0));
    }
    let corners = (0..positions.len())
        .map(|i| VertexRef {
            position: i,
            ..Default::default()
        })
        .collect();
    Mesh::new(
        positions,
        vec![],
        vec![Vec3::new(0.0, 0.0, 1.0)],
        vec![Face { corners }],
    )
}

fn benchmark_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pass");
    group.sample_size(20);

    let mesh = disc_mesh(400);
    for mode in [ShadingMode::Wireframe, ShadingMode::Flat, ShadingMode::Phong] {
        let settings = RenderSettings {
            width: BUFFER_WIDTH,
            height: BUFFER_HEIGHT,
            mode,
            ..RenderSettings::default()
        };
        group.bench_function(format!("{mode}"), |b| {
            b.iter(|| render(black_box(&mesh), &settings).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_triangle_fill,
    benchmark_depth_writes,
    benchmark_full_pass
);
criterion_main!(benches);
