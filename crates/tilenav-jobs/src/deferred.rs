//! One-shot, single-consumer result handoff between a worker and a poller.
//!
//! [`deferred`] returns a linked [`Promise`] / [`Deferred`] pair. The worker
//! fulfils the promise once; the consumer checks the deferred with
//! [`Deferred::try_take`], which never blocks.

use std::fmt;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};

/// Result of a non-blocking look at a [`Deferred`].
#[derive(Debug, Clone, PartialEq)]
pub enum TryTake<T> {
    /// Not fulfilled yet.
    Pending,
    /// The value. Handed out exactly once.
    Ready(T),
    /// The promise was dropped unfulfilled, or the value was already taken.
    Closed,
}

/// Producer half. Consumed by [`fulfil`](Self::fulfil).
pub struct Promise<T> {
    tx: Sender<T>,
}

impl<T> Promise<T> {
    /// Hand the value to the consumer. A consumer that has gone away is
    /// not an error; the value is dropped.
    pub fn fulfil(self, value: T) {
        let _ = self.tx.send(value);
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Promise(..)")
    }
}

enum State<T> {
    Waiting(Receiver<T>),
    Ready(T),
    Closed,
}

/// Consumer half: pending until the promise is fulfilled, then ready until
/// the value is taken.
pub struct Deferred<T> {
    state: State<T>,
}

/// A linked promise/deferred pair.
pub fn deferred<T>() -> (Promise<T>, Deferred<T>) {
    let (tx, rx) = bounded(1);
    (
        Promise { tx },
        Deferred {
            state: State::Waiting(rx),
        },
    )
}

impl<T> Deferred<T> {
    /// A handle that is already fulfilled.
    pub fn ready(value: T) -> Self {
        Self {
            state: State::Ready(value),
        }
    }

    /// Zero-wait readiness check. `true` once the promise was fulfilled or
    /// dropped.
    pub fn is_ready(&mut self) -> bool {
        self.poll();
        !matches!(self.state, State::Waiting(_))
    }

    /// Take the value if it is there, without blocking.
    pub fn try_take(&mut self) -> TryTake<T> {
        self.poll();
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Waiting(rx) => {
                self.state = State::Waiting(rx);
                TryTake::Pending
            }
            State::Ready(value) => TryTake::Ready(value),
            State::Closed => TryTake::Closed,
        }
    }

    /// Block until the value arrives. `None` if the promise was dropped or
    /// the value was already taken. Never call this from the tick thread.
    pub fn wait(self) -> Option<T> {
        match self.state {
            State::Waiting(rx) => rx.recv().ok(),
            State::Ready(value) => Some(value),
            State::Closed => None,
        }
    }

    /// Block for at most `timeout`.
    pub fn wait_timeout(&mut self, timeout: Duration) -> TryTake<T> {
        if let State::Waiting(rx) = &self.state {
            match rx.recv_timeout(timeout) {
                Ok(value) => self.state = State::Ready(value),
                Err(RecvTimeoutError::Timeout) => return TryTake::Pending,
                Err(RecvTimeoutError::Disconnected) => self.state = State::Closed,
            }
        }
        self.try_take()
    }

    fn poll(&mut self) {
        if let State::Waiting(rx) = &self.state {
            match rx.try_recv() {
                Ok(value) => self.state = State::Ready(value),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => self.state = State::Closed,
            }
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Waiting(_) => "waiting",
            State::Ready(_) => "ready",
            State::Closed => "closed",
        };
        f.debug_tuple("Deferred").field(&state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn pending_until_fulfilled() {
        let (promise, mut handle) = deferred::<u32>();
        assert!(!handle.is_ready());
        assert_eq!(handle.try_take(), TryTake::Pending);
        promise.fulfil(7);
        assert!(handle.is_ready());
        assert_eq!(handle.try_take(), TryTake::Ready(7));
        assert_eq!(handle.try_take(), TryTake::Closed);
    }

    #[test]
    fn dropped_promise_closes() {
        let (promise, mut handle) = deferred::<u32>();
        drop(promise);
        assert!(handle.is_ready());
        assert_eq!(handle.try_take(), TryTake::Closed);
    }

    #[test]
    fn ready_handle() {
        let mut handle = Deferred::ready("done");
        assert!(handle.is_ready());
        assert_eq!(handle.try_take(), TryTake::Ready("done"));
    }

    #[test]
    fn fulfil_from_another_thread() {
        let (promise, handle) = deferred::<Vec<u8>>();
        let worker = thread::spawn(move || promise.fulfil(vec![1, 2, 3]));
        assert_eq!(handle.wait(), Some(vec![1, 2, 3]));
        worker.join().unwrap();
    }

    #[test]
    fn wait_timeout_reports_pending() {
        let (promise, mut handle) = deferred::<u8>();
        assert_eq!(
            handle.wait_timeout(Duration::from_millis(5)),
            TryTake::Pending
        );
        promise.fulfil(1);
        assert_eq!(
            handle.wait_timeout(Duration::from_millis(5)),
            TryTake::Ready(1)
        );
    }

    #[test]
    fn fulfil_after_consumer_dropped_is_harmless() {
        let (promise, handle) = deferred::<u8>();
        drop(handle);
        promise.fulfil(3);
    }
}
