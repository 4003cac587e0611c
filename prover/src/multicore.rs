//! Thread-pool plumbing for the data-parallel kernels.
//!
//! Every parallel section runs inside a [`Worker`]'s dedicated rayon pool so
//! a caller-supplied thread-count override (including 1, which serializes
//! everything) is honored without touching the global pool.

use rayon::prelude::*;

#[derive(Debug)]
pub struct Worker {
    pool: rayon::ThreadPool,
}

impl Worker {
    /// Builds a pool with `threads` workers, or one sized to the available
    /// parallelism when `None`.
    pub fn new(threads: Option<usize>) -> Worker {
        let threads = threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(Into::into)
                    .unwrap_or(1)
            })
            .max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("building a thread pool with a fixed size cannot fail");
        Worker { pool }
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `f` inside this worker's pool. Nested calls from within the pool
    /// execute inline.
    pub fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        self.pool.install(f)
    }

    pub fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        self.pool.install(|| rayon::join(a, b))
    }
}

impl Default for Worker {
    fn default() -> Self {
        Worker::new(None)
    }
}

/// Splits `v` into roughly thread-count chunks and runs `f` on each with the
/// chunk's base offset.
pub fn parallelize<T: Send, F: Fn(&mut [T], usize) + Send + Sync>(
    worker: &Worker,
    v: &mut [T],
    f: F,
) {
    let n = v.len();
    if n == 0 {
        return;
    }
    let num_threads = worker.num_threads();
    let mut chunk = n / num_threads;
    if chunk < 1 {
        chunk = 1;
    }
    worker.install(|| {
        v.par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(i, sub)| f(sub, i * chunk));
    });
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parallelize_covers_all_offsets() {
        for threads in [1, 2, 7] {
            let worker = Worker::new(Some(threads));
            let mut v = vec![0usize; 1000];
            parallelize(&worker, &mut v, |chunk, start| {
                for (i, x) in chunk.iter_mut().enumerate() {
                    *x = start + i;
                }
            });
            for (i, x) in v.iter().enumerate() {
                assert_eq!(*x, i);
            }
        }
    }

    #[test]
    fn test_single_thread_override() {
        let worker = Worker::new(Some(1));
        assert_eq!(worker.num_threads(), 1);
    }
}
