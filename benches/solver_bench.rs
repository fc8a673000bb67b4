//! Benchmarks for the frame solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame_solver::prelude::*;

fn create_cantilever() -> (Structure, LoadSet) {
    let mut frame = Structure::new();
    let steel = Material::steel();
    let section = Section::rectangular(0.3, 0.5);

    let n0 = frame.add_node(Node::new(0.0, 0.0));
    let n1 = frame.add_node(Node::new(10.0, 0.0));
    frame.add_member(n0, n1, &steel, &section).unwrap();
    frame.add_support(Support::fixed(n0)).unwrap();

    let loads = LoadSet::new().with_nodal(NodalLoad::force(n1, 0.0, -10_000.0));
    (frame, loads)
}

fn create_multi_story_frame(stories: usize, bays: usize) -> (Structure, LoadSet) {
    let mut frame = Structure::new();
    let steel = Material::steel();
    let column = Section::rectangular(0.4, 0.4);
    let beam = Section::rectangular(0.3, 0.6);

    let story_height = 3.5;
    let bay_width = 6.0;
    let node = |story: usize, bay: usize| story * (bays + 1) + bay;

    for story in 0..=stories {
        for bay in 0..=bays {
            frame.add_node(Node::new(bay as f64 * bay_width, story as f64 * story_height));
        }
    }

    for story in 0..stories {
        for bay in 0..=bays {
            frame
                .add_member(node(story, bay), node(story + 1, bay), &steel, &column)
                .unwrap();
        }
    }

    let mut loads = LoadSet::new();
    for story in 1..=stories {
        for bay in 0..bays {
            let element = frame
                .add_member(node(story, bay), node(story, bay + 1), &steel, &beam)
                .unwrap();
            loads.push_distributed(DistributedLoad::global(element, -25_000.0, -25_000.0));
        }
        loads.push_nodal(NodalLoad::force(node(story, 0), 5_000.0, 0.0));
    }

    for bay in 0..=bays {
        frame.add_support(Support::fixed(node(0, bay))).unwrap();
    }

    (frame, loads)
}

fn benchmark_cantilever(c: &mut Criterion) {
    let (frame, loads) = create_cantilever();
    c.bench_function("cantilever_linear", |b| {
        b.iter(|| black_box(frame.solve(&loads).unwrap()))
    });
}

fn benchmark_small_frame(c: &mut Criterion) {
    let (frame, loads) = create_multi_story_frame(3, 2);
    c.bench_function("frame_3story_2bay_linear", |b| {
        b.iter(|| black_box(frame.solve(&loads).unwrap()))
    });
}

fn benchmark_medium_frame(c: &mut Criterion) {
    let (frame, loads) = create_multi_story_frame(10, 5);
    c.bench_function("frame_10story_5bay_linear", |b| {
        b.iter(|| black_box(frame.solve(&loads).unwrap()))
    });
}

fn benchmark_lu_solver(c: &mut Criterion) {
    let (frame, loads) = create_multi_story_frame(10, 5);
    let options = AnalysisOptions::linear().with_solver(SolverKind::Lu);
    c.bench_function("frame_10story_5bay_lu", |b| {
        b.iter(|| black_box(frame.solve_with(&loads, &options).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_cantilever,
    benchmark_small_frame,
    benchmark_medium_frame,
    benchmark_lu_solver,
);

criterion_main!(benches);
