//! Dispatch of path and waypoint requests onto worker threads.
//!
//! A [`PathJobs`] shares one [`PathFinder`] between all of its workers.
//! The finder's grid and open list are mutated in place by every search, so
//! each job holds the finder lock for its whole `init → set_start →
//! set_end → find_path` sequence. Searches on one finder therefore run
//! strictly one at a time however many workers there are; more workers
//! only help when jobs spend time outside the lock. Requests may complete
//! in any order.

use std::sync::{Arc, Mutex, MutexGuard};

use glam::Vec2;
use tilenav_paths::PathFinder;

use crate::config::JobsConfig;
use crate::data::PathData;
use crate::deferred::{Deferred, deferred};
use crate::error::JobsError;
use crate::pool::WorkerPool;

/// Whether a position is unknown: a negative (or NaN) coordinate marks a
/// position that has not been resolved yet.
#[inline]
fn is_unknown(pos: Vec2) -> bool {
    !(pos.x >= 0.0 && pos.y >= 0.0)
}

/// Request for a path between two world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindPathRequest {
    pub from: Vec2,
    pub to: Vec2,
}

impl FindPathRequest {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    /// Both endpoints known.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !is_unknown(self.from) && !is_unknown(self.to)
    }
}

/// Request for a random walkable waypoint near a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomRadiusRequest {
    pub center: Vec2,
    pub radius: f32,
}

impl RandomRadiusRequest {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !is_unknown(self.center) && self.radius.is_finite()
    }
}

/// Asynchronous front end to one shared [`PathFinder`].
pub struct PathJobs {
    finder: Arc<Mutex<PathFinder>>,
    pool: WorkerPool,
}

impl PathJobs {
    /// Take ownership of `finder` and start the worker pool.
    pub fn new(finder: PathFinder, config: JobsConfig) -> Result<Self, JobsError> {
        Ok(Self {
            finder: Arc::new(Mutex::new(finder)),
            pool: WorkerPool::new(&config)?,
        })
    }

    /// Queue a path search. Invalid requests resolve immediately to
    /// [`PathData::Empty`] without touching the finder.
    pub fn submit_find_path(&self, request: FindPathRequest) -> Deferred<PathData> {
        if !request.is_valid() {
            log::debug!("rejected path request {:?}", request);
            return Deferred::ready(PathData::Empty);
        }
        self.dispatch(move |finder| run_find_path(finder, request))
    }

    /// Queue a random-waypoint pick around `request.center`.
    pub fn submit_random_radius(&self, request: RandomRadiusRequest) -> Deferred<PathData> {
        if !request.is_valid() {
            log::debug!("rejected random waypoint request {:?}", request);
            return Deferred::ready(PathData::Empty);
        }
        self.dispatch(move |finder| run_random_radius(finder, request))
    }

    /// Run a path search on the calling thread. Blocks on the finder lock.
    pub fn find_path_blocking(&self, request: FindPathRequest) -> PathData {
        if !request.is_valid() {
            return PathData::Empty;
        }
        run_find_path(&mut lock_finder(&self.finder), request)
    }

    /// Run `f` with exclusive access to the finder. Blocks on the finder
    /// lock.
    pub fn with_finder<R>(&self, f: impl FnOnce(&mut PathFinder) -> R) -> R {
        f(&mut lock_finder(&self.finder))
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Stop accepting jobs, finish the queued ones and join the workers.
    pub fn shutdown(mut self) {
        self.pool.shutdown();
    }

    fn dispatch(
        &self,
        job: impl FnOnce(&mut PathFinder) -> PathData + Send + 'static,
    ) -> Deferred<PathData> {
        let (promise, handle) = deferred();
        let finder = Arc::clone(&self.finder);
        let queued = self.pool.execute(move || {
            let data = job(&mut lock_finder(&finder));
            promise.fulfil(data);
        });
        if !queued {
            log::warn!("path job dropped: worker pool is shut down");
        }
        handle
    }
}

impl std::fmt::Debug for PathJobs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathJobs")
            .field("workers", &self.pool.size())
            .finish_non_exhaustive()
    }
}

/// Lock the finder, recovering from a poisoned lock. The next `init()`
/// wipes whatever state the panicking holder left behind.
fn lock_finder(finder: &Mutex<PathFinder>) -> MutexGuard<'_, PathFinder> {
    finder.lock().unwrap_or_else(|poisoned| {
        log::error!("path finder lock poisoned, recovering");
        poisoned.into_inner()
    })
}

fn run_find_path(finder: &mut PathFinder, request: FindPathRequest) -> PathData {
    finder.init();
    finder.set_start(request.from);
    finder.set_end(request.to);
    let path = finder.find_path();
    if path.is_empty() {
        PathData::Empty
    } else {
        PathData::Path(path.to_vec())
    }
}

fn run_random_radius(finder: &mut PathFinder, request: RandomRadiusRequest) -> PathData {
    let point = finder.random_waypoint_in_radius(request.center, request.radius);
    if point == Vec2::ZERO {
        PathData::Empty
    } else {
        PathData::RandomPoint(point)
    }
}
