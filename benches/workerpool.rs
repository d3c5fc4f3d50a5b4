use mandelzoom::bench::{Benchmark, BenchmarkReport};
use mandelzoom::threads::WorkerPool;

const TASK_MEM_SIZE: usize = 100_000;
const TASK_CPU_SIZE: usize = 1000;
const ITN: usize = 10;

fn square(mut x: u64) -> u64 {
    for _ in 0..TASK_CPU_SIZE {
        x = x.wrapping_mul(x).wrapping_add(x);
    }
    x
}

fn bench_pool(workers: usize) -> Benchmark {
    let name = format!("square-w{}-n{}", workers, TASK_MEM_SIZE);
    let items: Vec<u64> = (0..TASK_MEM_SIZE as u64).collect();
    let pool = WorkerPool::new("bench", workers);
    Benchmark::iter(&name, ITN, move || {
        pool.call(&items, |part| part.iter().fold(0u64, |acc, x| acc.wrapping_add(square(*x))))
            .expect("pool failed");
    })
}

fn main() {
    BenchmarkReport::with_benches(vec![
        bench_pool(1),
        bench_pool(2),
        bench_pool(4),
        bench_pool(8),
        bench_pool(10),
    ])
    .report("workerpool")
    .expect("failed to write report");
}
