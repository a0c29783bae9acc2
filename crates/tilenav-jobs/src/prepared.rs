//! Per-consumer polling of path job results.
//!
//! A bot (or any per-tick consumer) keeps one [`PreparedPath`]. When it
//! submits a request it stores the returned handle with
//! [`set_pending`](PreparedPath::set_pending); every tick it calls
//! [`try_consume`](PreparedPath::try_consume), which never blocks. A
//! `PreparedPath` belongs to the tick thread and is not shared.

use glam::Vec2;

use crate::data::PathData;
use crate::deferred::{Deferred, TryTake};

#[derive(Debug, Default)]
pub struct PreparedPath {
    pending: Option<Deferred<PathData>>,
    data: PathData,
}

impl PreparedPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly submitted request. A handle that was still pending is
    /// dropped and its result discarded when it arrives.
    pub fn set_pending(&mut self, handle: Deferred<PathData>) {
        if self.pending.is_some() {
            log::trace!("replacing an unconsumed path request");
        }
        self.pending = Some(handle);
    }

    /// Whether a submitted request has not been drained yet.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drain a finished request into `target`.
    ///
    /// - Pending and not ready: returns `false`, nothing changes.
    /// - Ready with data: stores it, drops the handle, moves `target` into
    ///   `old_target`, writes the new target and returns `true`.
    /// - Ready but empty (rejected request, no candidate, lost worker):
    ///   stores the empty data, drops the handle, returns `false` and
    ///   leaves both targets alone.
    /// - No handle: returns whether the last drained data is non-empty.
    pub fn try_consume(&mut self, target: &mut Vec2, old_target: &mut Vec2) -> bool {
        let Some(handle) = self.pending.as_mut() else {
            return !self.data.is_empty();
        };

        let data = match handle.try_take() {
            TryTake::Pending => return false,
            TryTake::Ready(data) => data,
            TryTake::Closed => {
                log::warn!("path request ended without a result");
                PathData::Empty
            }
        };
        self.pending = None;
        self.data = data;

        match self.data.target() {
            Some(next) => {
                *old_target = *target;
                *target = next;
                true
            }
            None => false,
        }
    }

    /// The last drained result.
    #[inline]
    pub fn data(&self) -> &PathData {
        &self.data
    }

    /// Take the last drained result, leaving [`PathData::Empty`].
    pub fn take_data(&mut self) -> PathData {
        std::mem::take(&mut self.data)
    }

    /// Forget both the pending handle and the stored result.
    pub fn clear(&mut self) {
        self.pending = None;
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deferred::deferred;

    #[test]
    fn pending_handle_is_a_no_op() {
        let (_promise, handle) = deferred();
        let mut prepared = PreparedPath::new();
        prepared.set_pending(handle);

        let mut target = Vec2::new(5.0, 5.0);
        let mut old = Vec2::ZERO;
        assert!(!prepared.try_consume(&mut target, &mut old));
        assert_eq!(target, Vec2::new(5.0, 5.0));
        assert_eq!(old, Vec2::ZERO);
        assert!(prepared.is_pending());
    }

    #[test]
    fn ready_point_updates_targets_once() {
        let (promise, handle) = deferred();
        let mut prepared = PreparedPath::new();
        prepared.set_pending(handle);
        promise.fulfil(PathData::RandomPoint(Vec2::new(80.0, 48.0)));

        let mut target = Vec2::new(16.0, 16.0);
        let mut old = Vec2::ZERO;
        assert!(prepared.try_consume(&mut target, &mut old));
        assert_eq!(target, Vec2::new(80.0, 48.0));
        assert_eq!(old, Vec2::new(16.0, 16.0));
        assert!(!prepared.is_pending());

        // Drained: later polls report the stored data without touching the
        // targets again.
        target = Vec2::new(1.0, 1.0);
        assert!(prepared.try_consume(&mut target, &mut old));
        assert_eq!(target, Vec2::new(1.0, 1.0));
        assert_eq!(old, Vec2::new(16.0, 16.0));
    }

    #[test]
    fn ready_path_targets_first_step() {
        let mut prepared = PreparedPath::new();
        prepared.set_pending(Deferred::ready(PathData::Path(vec![
            Vec2::new(16.0, 16.0),
            Vec2::new(16.0, 48.0),
            Vec2::new(16.0, 80.0),
        ])));
        let mut target = Vec2::ZERO;
        let mut old = Vec2::ZERO;
        assert!(prepared.try_consume(&mut target, &mut old));
        assert_eq!(target, Vec2::new(16.0, 48.0));
        assert_eq!(prepared.data().destination(), Some(Vec2::new(16.0, 80.0)));
    }

    #[test]
    fn empty_result_leaves_targets() {
        let mut prepared = PreparedPath::new();
        prepared.set_pending(Deferred::ready(PathData::Empty));
        let mut target = Vec2::new(3.0, 4.0);
        let mut old = Vec2::new(1.0, 2.0);
        assert!(!prepared.try_consume(&mut target, &mut old));
        assert_eq!((target, old), (Vec2::new(3.0, 4.0), Vec2::new(1.0, 2.0)));
        assert!(!prepared.is_pending());
    }

    #[test]
    fn abandoned_request_reads_as_empty() {
        let (promise, handle) = deferred::<PathData>();
        let mut prepared = PreparedPath::new();
        prepared.set_pending(handle);
        drop(promise);
        let mut target = Vec2::ZERO;
        let mut old = Vec2::ZERO;
        assert!(!prepared.try_consume(&mut target, &mut old));
        assert!(!prepared.is_pending());
        assert_eq!(prepared.data(), &PathData::Empty);
    }

    #[test]
    fn nothing_submitted() {
        let mut prepared = PreparedPath::new();
        let mut target = Vec2::ZERO;
        let mut old = Vec2::ZERO;
        assert!(!prepared.try_consume(&mut target, &mut old));
    }

    #[test]
    fn take_and_clear() {
        let mut prepared = PreparedPath::new();
        prepared.set_pending(Deferred::ready(PathData::RandomPoint(Vec2::ONE)));
        let (mut t, mut o) = (Vec2::ZERO, Vec2::ZERO);
        assert!(prepared.try_consume(&mut t, &mut o));
        assert_eq!(prepared.take_data(), PathData::RandomPoint(Vec2::ONE));
        assert!(!prepared.try_consume(&mut t, &mut o));

        let (_promise, handle) = deferred();
        prepared.set_pending(handle);
        prepared.clear();
        assert!(!prepared.is_pending());
    }
}
