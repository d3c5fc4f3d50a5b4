use std::collections::BTreeSet;

use mandelzoom::bench::{Benchmark, BenchmarkReport};
use mandelzoom::coord::Viewport;
use mandelzoom::painter::Ember;
use mandelzoom::render::FrameRenderer;
use mandelzoom::solver::EscapeSolver;
use mandelzoom::zoom;

const REPEATS: usize = 5;

fn worker_counts() -> Vec<usize> {
    let counts: BTreeSet<usize> = [1, 2, 4, 10, num_cpus::get_physical(), num_cpus::get()]
        .into_iter()
        .collect();
    counts.into_iter().collect()
}

fn bench_render(name: &str, viewport: Viewport, size: u32, workers: usize) -> Benchmark {
    let renderer = FrameRenderer::new(EscapeSolver::default(), Ember, workers);
    let f = move || {
        renderer
            .render(&viewport, size, size)
            .expect("render failed");
    };
    Benchmark::iter(&format!("render-{}-{}-w{}", name, size, workers), REPEATS, f)
}

fn main() {
    let full = Viewport::default();
    let mut deep = full;
    for _ in 0..20 {
        deep = zoom(&deep, 530, 410, 800, 800, 0.8).expect("zoom failed");
    }

    let mut benches = vec![];
    for workers in worker_counts() {
        benches.push(bench_render("full", full, 800, workers));
        benches.push(bench_render("deep", deep, 800, workers));
    }
    BenchmarkReport::with_benches(benches)
        .report("render")
        .expect("failed to write report");
}
