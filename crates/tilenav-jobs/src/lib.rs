//! Asynchronous path requests for per-tick consumers.
//!
//! The simulation thread must never wait on a search. It submits requests
//! to a [`PathJobs`] runner, keeps the returned [`Deferred`] in a
//! [`PreparedPath`], and polls that once per tick:
//!
//! ```no_run
//! use glam::Vec2;
//! use tilenav_jobs::{FindPathRequest, JobsConfig, PathJobs, PreparedPath};
//! use tilenav_paths::{PathConfig, PathFinder};
//!
//! let finder = PathFinder::build(64, 64, PathConfig::default(), |_| true)?;
//! let jobs = PathJobs::new(finder, JobsConfig::default())?;
//!
//! let mut prepared = PreparedPath::new();
//! let (mut target, mut old_target) = (Vec2::ZERO, Vec2::ZERO);
//! prepared.set_pending(jobs.submit_find_path(FindPathRequest::new(
//!     Vec2::new(16.0, 16.0),
//!     Vec2::new(1000.0, 400.0),
//! )));
//!
//! // Each tick:
//! if prepared.try_consume(&mut target, &mut old_target) {
//!     // head for `target`
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod data;
mod deferred;
mod error;
mod pool;
mod prepared;
mod runner;

pub use config::JobsConfig;
pub use data::PathData;
pub use deferred::{Deferred, Promise, TryTake, deferred};
pub use error::JobsError;
pub use pool::WorkerPool;
pub use prepared::PreparedPath;
pub use runner::{FindPathRequest, PathJobs, RandomRadiusRequest};
