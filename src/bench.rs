use std::fs;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A named closure timed over a fixed number of calls.
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    iterations: usize,
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, n: usize, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            iterations: n.max(1),
        }
    }

    fn run(&self) -> Timing {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        Timing {
            name: self.name.clone(),
            iterations: self.iterations,
            total: start.elapsed(),
        }
    }
}

/// Right-aligned duration in the coarsest unit that keeps four significant
/// digits.
fn human(d: Duration) -> String {
    let ns = d.as_nanos();
    let (value, symbol) = match ns {
        0..=9_999 => (ns, "ns"),
        10_000..=9_999_999 => (ns / 1_000, "us"),
        10_000_000..=9_999_999_999 => (ns / 1_000_000, "ms"),
        _ => (ns / 1_000_000_000, "s"),
    };
    format!("{:>6}{:<2}", value, symbol)
}

#[derive(Clone, Debug)]
struct Timing {
    name: String,
    iterations: usize,
    total: Duration,
}

impl Timing {
    fn per_call(&self) -> Duration {
        self.total.div_f64(self.iterations as f64)
    }
}

pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    results: Vec<Timing>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: Vec<Benchmark>) -> Self {
        Self {
            benches,
            results: vec![],
        }
    }

    fn run(&mut self) -> io::Result<()> {
        let mut out = stdout();
        for bench in &self.benches {
            self.results.push(bench.run());
            write!(out, ".")?;
            out.flush()?;
        }
        writeln!(out)?;
        writeln!(out, "  {: <30} {: >8}   {: >8}", "benchmark", "total", "per_call")?;
        for t in &self.results {
            writeln!(out, "  {: <30} {}   {}", t.name, human(t.total), human(t.per_call()))?;
        }
        out.flush()
    }

    fn csv(&self) -> String {
        let mut lines: Vec<String> = vec!["benchmark,total_us,iterations,per_call_us".to_string()];
        for t in &self.results {
            lines.push(format!(
                "{},{},{},{}",
                t.name,
                t.total.as_micros(),
                t.iterations,
                t.per_call().as_micros(),
            ));
        }
        lines.push("".to_string());
        lines.join("\n")
    }

    /// Runs every benchmark, prints a table and writes `benchmark_<name>.csv`.
    pub fn report(&mut self, name: &str) -> io::Result<()> {
        print!("Benchmark: {}", name);
        self.run()?;
        fs::write(format!("benchmark_{}.csv", name), self.csv())
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_human_units() {
        assert_eq!(human(Duration::from_nanos(250)), "   250ns");
        assert_eq!(human(Duration::from_micros(1500)), "  1500us");
        assert_eq!(human(Duration::from_millis(42)), "    42ms");
        assert_eq!(human(Duration::from_secs(12)), "    12s ");
    }

    #[test]
    fn test_benchmark_runs_every_iteration() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let bench = Benchmark::iter("count", 5, move || counter.set(counter.get() + 1));
        let mut report = BenchmarkReport::with_benches(vec![bench]);
        report.run().unwrap();
        assert_eq!(calls.get(), 5);
        let csv = report.csv();
        assert!(csv.starts_with("benchmark,total_us,iterations,per_call_us\ncount,"));
        assert_eq!(csv.lines().count(), 2);
    }
}
