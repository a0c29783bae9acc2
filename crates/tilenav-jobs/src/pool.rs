//! Fixed-size pool of named worker threads fed from one job queue.
//!
//! Every worker owns a clone of the queue's receiving end and takes the
//! next job as soon as it is idle.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::config::JobsConfig;
use crate::error::JobsError;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Worker threads that run queued closures until the pool shuts down.
///
/// The pool owns its threads: [`shutdown`](Self::shutdown), or dropping the
/// pool, closes the queue, lets the workers finish what is already queued
/// and joins them.
pub struct WorkerPool {
    tx: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(config: &JobsConfig) -> Result<Self, JobsError> {
        if config.workers == 0 {
            return Err(JobsError::NoWorkers);
        }

        let (tx, rx) = unbounded::<Job>();
        let mut pool = Self {
            tx: Some(tx),
            workers: Vec::with_capacity(config.workers),
        };

        for n in 0..config.workers {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("{}-{n}", config.thread_name))
                .spawn(move || worker_loop(rx))
                .map_err(|e| JobsError::Spawn(e.to_string()))?;
            pool.workers.push(handle);
        }

        log::debug!("started {} path workers", config.workers);
        Ok(pool)
    }

    /// Queue a job. Returns `false` (and drops the job) once the pool is
    /// shutting down.
    pub fn execute(&self, job: impl FnOnce() + Send + 'static) -> bool {
        match &self.tx {
            Some(tx) => tx.send(Box::new(job)).is_ok(),
            None => false,
        }
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Close the queue and join every worker. Idempotent.
    pub fn shutdown(&mut self) {
        // Workers exit once the queue is empty and the sender is gone.
        self.tx.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("path worker exited by panic");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(rx: Receiver<Job>) {
    // Ends once the queue is drained and every sender is gone.
    for job in rx.iter() {
        log::trace!(
            "{} picked up a job",
            thread::current().name().unwrap_or("worker")
        );
        // A panicking job drops its promise, which the consumer sees as a
        // closed handle. The worker itself keeps going.
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            log::error!("path job panicked");
        }
    }
}
