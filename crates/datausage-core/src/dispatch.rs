//! Delivery-context plumbing for completion callbacks.
//!
//! A `Dispatcher` names one context (in practice: the presentation
//! loop's thread) that completion callbacks must land on.
//! `LoopDispatcher` binds to the thread that created it and queues jobs
//! onto a channel the owning loop drains.

use std::thread::{self, ThreadId};

use tokio::sync::mpsc;
use tracing::warn;

/// A unit of work handed to a dispatcher.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// One designated delivery context for callbacks.
pub trait Dispatcher: Send + Sync {
    /// True when the calling thread is the dispatcher's own context.
    fn is_current(&self) -> bool;

    /// Queue a job onto the context.
    fn dispatch(&self, job: Job);

    /// Run the job synchronously when already on the context, queue it
    /// otherwise.
    fn dispatch_or_run(&self, job: Job) {
        if self.is_current() {
            job();
        } else {
            self.dispatch(job);
        }
    }
}

/// Dispatcher bound to the thread that created it.
///
/// The paired `JobReceiver` stays with that thread's loop, which drains
/// queued jobs between its other duties.
#[derive(Clone)]
pub struct LoopDispatcher {
    home: ThreadId,
    tx: mpsc::UnboundedSender<Job>,
}

impl LoopDispatcher {
    pub fn new() -> (Self, JobReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            home: thread::current().id(),
            tx,
        };

        (dispatcher, JobReceiver { rx })
    }
}

impl Dispatcher for LoopDispatcher {
    fn is_current(&self) -> bool {
        thread::current().id() == self.home
    }

    fn dispatch(&self, job: Job) {
        // A closed channel means the owning loop is gone and the job has
        // nowhere left to run.
        if self.tx.send(job).is_err() {
            warn!("Dispatch target is gone, dropping job");
        }
    }
}

/// Receiving half of a `LoopDispatcher`; lives with the owning loop.
pub struct JobReceiver {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl JobReceiver {
    /// Await the next queued job. `None` once every dispatcher handle is
    /// dropped and the queue is drained.
    pub async fn next_job(&mut self) -> Option<Job> {
        self.rx.recv().await
    }

    /// Run everything queued so far without blocking; returns how many
    /// jobs ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_or_run_runs_inline_on_home_thread() {
        let (dispatcher, mut jobs) = LoopDispatcher::new();
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        dispatcher.dispatch_or_run(Box::new(move || flag.store(true, Ordering::SeqCst)));

        assert!(ran.load(Ordering::SeqCst), "job must run before returning");
        assert_eq!(jobs.run_pending(), 0);
    }

    #[test]
    fn test_dispatch_or_run_queues_from_other_threads() {
        let (dispatcher, mut jobs) = LoopDispatcher::new();
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        let handle = std::thread::spawn(move || {
            dispatcher.dispatch_or_run(Box::new(move || flag.store(true, Ordering::SeqCst)));
        });
        handle.join().unwrap();

        assert!(!ran.load(Ordering::SeqCst), "job must wait for the owning loop");
        assert_eq!(jobs.run_pending(), 1);
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_run_pending_preserves_queue_order() {
        let (dispatcher, mut jobs) = LoopDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            // Queue directly so the inline shortcut cannot kick in.
            dispatcher.dispatch(Box::new(move || log.lock().unwrap().push(label)));
        }

        assert_eq!(jobs.run_pending(), 3);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_next_job_hands_over_queued_jobs() {
        let (dispatcher, mut jobs) = std::thread::spawn(LoopDispatcher::new).join().unwrap();
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        dispatcher.dispatch_or_run(Box::new(move || flag.store(true, Ordering::SeqCst)));

        let job = jobs.next_job().await.unwrap();
        assert!(!ran.load(Ordering::SeqCst));
        job();
        assert!(ran.load(Ordering::SeqCst));
    }
}
