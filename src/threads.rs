use std::io;
use std::thread;

use thiserror::Error;

pub trait Split<T> {
    /// `n` contiguous parts of `len / n` items each. The last `len % n`
    /// items belong to no part.
    fn split_even(&self, n: usize) -> Vec<&[T]>;
}

impl<T> Split<T> for [T] {
    fn split_even(&self, n: usize) -> Vec<&[T]> {
        if n == 0 {
            return vec![];
        }
        let size = self.len() / n;
        (0..n).map(|i| &self[i * size..(i + 1) * size]).collect()
    }
}

pub trait Join: Sized {
    fn join_vec(parts: Vec<Self>) -> Self;
}

impl<T> Join for Vec<T> {
    fn join_vec(parts: Vec<Self>) -> Self {
        let len = parts.iter().map(Vec::len).sum();
        let mut v = Vec::with_capacity(len);
        for part in parts {
            v.extend(part);
        }
        v
    }
}

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("worker pool has no workers")]
    NoWorkers,
    #[error("failed to spawn worker {worker}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },
    #[error("worker {worker} panicked")]
    Panicked { worker: usize },
}

/// Fixed number of threads, spawned for each call and joined before it returns.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    name: String,
    workers: usize,
    #[cfg(test)]
    refuse_spawn_from: Option<usize>,
}

impl WorkerPool {
    pub fn new(name: &str, workers: usize) -> Self {
        Self {
            name: name.to_string(),
            workers,
            #[cfg(test)]
            refuse_spawn_from: None,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Splits `items` evenly across the workers, runs `f` on every part in
    /// its own thread and returns the results in part order.
    pub fn call<T, U, F>(&self, items: &[T], f: F) -> Result<Vec<U>, ThreadError>
    where
        T: Sync,
        U: Send,
        F: Fn(&[T]) -> U + Sync,
    {
        if self.workers == 0 {
            return Err(ThreadError::NoWorkers);
        }
        let parts = items.split_even(self.workers);
        let f = &f;

        thread::scope(|s| -> Result<Vec<U>, ThreadError> {
            let mut handles = Vec::with_capacity(parts.len());
            for (n, part) in parts.into_iter().enumerate() {
                match self.spawn_worker(s, n, move || f(part)) {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        // reap the running workers so their panics stay inside the scope
                        for handle in handles {
                            let _ = handle.join();
                        }
                        return Err(ThreadError::Spawn { worker: n, source });
                    }
                }
            }

            // join everything before looking at failures
            let joined: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
            joined
                .into_iter()
                .enumerate()
                .map(|(worker, r)| r.map_err(|_| ThreadError::Panicked { worker }))
                .collect()
        })
    }

    fn spawn_worker<'scope, 'env, U, G>(
        &self,
        s: &'scope thread::Scope<'scope, 'env>,
        n: usize,
        g: G,
    ) -> io::Result<thread::ScopedJoinHandle<'scope, U>>
    where
        G: FnOnce() -> U + Send + 'scope,
        U: Send + 'scope,
    {
        #[cfg(test)]
        if self.refuse_spawn_from.map_or(false, |from| n >= from) {
            return Err(io::Error::new(io::ErrorKind::Other, "spawn refused"));
        }
        thread::Builder::new()
            .name(format!("{}-{}", self.name, n))
            .spawn_scoped(s, g)
    }

    /// Like [`WorkerPool::call`], joining the per-part outputs into one value.
    pub fn call_join<T, U, F>(&self, items: &[T], f: F) -> Result<U, ThreadError>
    where
        T: Sync,
        U: Join + Send,
        F: Fn(&[T]) -> U + Sync,
    {
        self.call(items, f).map(U::join_vec)
    }
}

#[cfg(test)]
fn test_vec_split(length: usize, n: usize) {
    let v: Vec<usize> = (0..length).collect();
    let parts = v.split_even(n);
    assert_eq!(parts.len(), n);
    let size = length / n;
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.len(), size);
        assert_eq!(part.first().copied(), (size > 0).then(|| i * size));
    }
    let covered: usize = parts.iter().map(|p| p.len()).sum();
    assert_eq!(covered, size * n);
}

#[test]
fn test_vec_splits() {
    test_vec_split(1, 1);
    test_vec_split(0, 2);
    test_vec_split(5, 8);
    test_vec_split(8, 5);
    test_vec_split(100, 1);
    test_vec_split(55, 47);
    test_vec_split(641601, 10);
}

#[test]
fn test_split_zero_parts() {
    let v = vec![1, 2, 3];
    assert!(v.split_even(0).is_empty());
}

#[test]
fn test_join_keeps_part_order() {
    let joined = Vec::join_vec(vec![vec![1, 2], vec![], vec![3]]);
    assert_eq!(joined, vec![1, 2, 3]);
}

#[test]
fn test_pool_call() {
    let pool = WorkerPool::new("test", 4);
    let v: Vec<u64> = (0..10).collect();
    let sums = pool.call(&v, |part| part.iter().sum::<u64>()).unwrap();
    // 10 / 4 = 2 per part, items 8 and 9 are dropped
    assert_eq!(sums, vec![1, 5, 9, 13]);
}

#[test]
fn test_pool_call_join() {
    let pool = WorkerPool::new("test", 3);
    let v: Vec<i32> = (0..7).collect();
    let doubled: Vec<i32> = pool
        .call_join(&v, |part| part.iter().map(|x| x * 2).collect::<Vec<_>>())
        .unwrap();
    assert_eq!(doubled, vec![0, 2, 4, 6, 8, 10]);
}

#[test]
fn test_pool_runs_on_named_threads() {
    let pool = WorkerPool::new("named", 2);
    let names = pool
        .call(&[0u8; 4], |_| thread::current().name().map(str::to_string))
        .unwrap();
    assert_eq!(
        names,
        vec![Some("named-0".to_string()), Some("named-1".to_string())]
    );
}

#[test]
fn test_pool_without_workers() {
    let pool = WorkerPool::new("empty", 0);
    let result = pool.call(&[1, 2, 3], |part| part.len());
    assert!(matches!(result, Err(ThreadError::NoWorkers)));
}

#[test]
fn test_pool_reports_panics() {
    let pool = WorkerPool::new("panicky", 2);
    let v: Vec<i32> = (0..4).collect();
    let result = pool.call(&v, |part| {
        if part[0] == 2 {
            panic!("boom");
        }
        part.len()
    });
    assert!(matches!(result, Err(ThreadError::Panicked { worker: 1 })));
}

#[test]
fn test_spawn_failure_joins_running_workers() {
    let mut pool = WorkerPool::new("refused", 3);
    pool.refuse_spawn_from = Some(1);
    let v: Vec<i32> = (0..6).collect();
    let result = pool.call(&v, |part| {
        if part[0] == 0 {
            panic!("first worker fails");
        }
        part.len()
    });
    assert!(matches!(result, Err(ThreadError::Spawn { worker: 1, .. })));
}
