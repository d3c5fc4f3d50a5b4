use crate::complex::C;

pub const DEFAULT_ITERATIONS: u16 = 255;
pub const DEFAULT_THRESHOLD: f64 = 2.0;

pub trait Solver {
    /// Escape count for one sample, `None` when it should not be painted.
    fn solve(&self, c: C<f64>) -> Option<u16>;
}

/// Escape-time evaluation of `z <- z^2 + c` seeded with `z = c`.
///
/// Counts of zero (escape on the first step) and orbits that survive every
/// iteration both come back as `None`, so only points that escape after at
/// least one step get a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapeSolver {
    iterations: u16,
    threshold: f64,
}

impl EscapeSolver {
    pub fn new(iterations: u16, threshold: f64) -> Self {
        Self {
            iterations,
            threshold,
        }
    }

    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn evaluate(&self, c: C<f64>) -> Option<u16> {
        let mut z = c;
        for count in 0..self.iterations {
            z = (z * z) + c;
            let norm = z.norm();
            if norm > self.threshold {
                return (count > 0).then_some(count);
            }
            if norm.is_nan() {
                return None;
            }
        }
        None
    }
}

impl Solver for EscapeSolver {
    fn solve(&self, c: C<f64>) -> Option<u16> {
        self.evaluate(c)
    }
}

impl Default for EscapeSolver {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::complex::{c, origin};

    #[test]
    fn test_origin_never_escapes() {
        for iterations in [1, 2, 10, 255, 1000] {
            let solver = EscapeSolver::new(iterations, 2.0);
            assert_eq!(solver.evaluate(origin()), None);
        }
    }

    #[test]
    fn test_immediate_escape_is_excluded() {
        let solver = EscapeSolver::default();
        for p in [c(3.0, 0.0), c(0.0, -2.5), c(-2.0, 1.5), c(1.0e10, 1.0e10)] {
            assert_eq!(solver.evaluate(p), None, "{}", p);
        }
    }

    #[test]
    fn test_escape_counts() {
        let solver = EscapeSolver::default();
        // 1 -> 2 -> 5
        assert_eq!(solver.evaluate(c(1.0, 0.0)), Some(1));
        // 0.5 -> 0.75 -> 1.0625 -> 1.6289 -> 3.1533
        assert_eq!(solver.evaluate(c(0.5, 0.0)), Some(3));
    }

    #[test]
    fn test_bounded_orbits() {
        let solver = EscapeSolver::default();
        assert_eq!(solver.evaluate(c(-1.0, 0.0)), None);
        assert_eq!(solver.evaluate(c(-2.0, 0.0)), None);
        assert_eq!(solver.evaluate(c(0.0, 1.0)), None);
        assert_eq!(solver.evaluate(c(-0.1, 0.1)), None);
    }

    #[test]
    fn test_iteration_ceiling() {
        // 0.5 needs four steps, so a budget of three never sees it escape
        assert_eq!(EscapeSolver::new(3, 2.0).evaluate(c(0.5, 0.0)), None);
        assert_eq!(EscapeSolver::new(4, 2.0).evaluate(c(0.5, 0.0)), Some(3));
    }

    #[test]
    fn test_nan_does_not_escape() {
        let solver = EscapeSolver::default();
        assert_eq!(solver.evaluate(c(f64::NAN, 0.0)), None);
    }

    #[test]
    fn test_deterministic() {
        let solver = EscapeSolver::default();
        let p = c(-0.7436, 0.1318);
        let first = solver.evaluate(p);
        for _ in 0..10 {
            assert_eq!(solver.evaluate(p), first);
        }
    }
}
