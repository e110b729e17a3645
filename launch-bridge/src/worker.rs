use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, sync_channel, Sender};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::WorkerUnavailable;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single long-lived thread that owns every Objective-C message send and
/// run loop pump, so they always happen with the same thread affinity.
pub struct Worker {
    sender: Mutex<Sender<Job>>,
    thread_id: ThreadId,
}

lazy_static! {
    static ref NATIVE_WORKER: Result<Worker, LaunchBridgeError> = Worker::spawn("launch-bridge");
}

impl Worker {
    pub fn spawn(name: &str) -> Result<Worker, LaunchBridgeError> {
        let (sender, receiver) = channel::<Job>();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for job in receiver {
                    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                        log::warn!("Worker job panicked");
                    }
                }

                log::debug!("Worker queue closed, exiting");
            })
            .map_err(|e| WorkerUnavailable(e.to_string()))?;

        log::debug!("Spawned worker {:?}", handle.thread().id());

        Ok(Worker {
            sender: Mutex::new(sender),
            thread_id: handle.thread().id(),
        })
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Run a job on the worker and block for its return value. Jobs
    /// submitted from the worker itself run inline.
    pub fn run<R, F>(&self, job: F) -> Result<R, LaunchBridgeError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if thread::current().id() == self.thread_id {
            return Ok(job());
        }

        let (reply_tx, reply_rx) = sync_channel(1);
        let boxed: Job = Box::new(move || {
            let _ = reply_tx.send(job());
        });

        self.sender
            .lock()
            .map_err(|_| WorkerUnavailable("queue lock poisoned".to_string()))?
            .send(boxed)
            .map_err(|_| WorkerUnavailable("worker thread exited".to_string()))?;

        reply_rx
            .recv()
            .map_err(|_| WorkerUnavailable("job dropped without a reply".to_string()))
    }
}

/// Run a job on the process-wide native worker
pub fn run_on_worker<R, F>(job: F) -> Result<R, LaunchBridgeError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    match &*NATIVE_WORKER {
        Ok(worker) => worker.run(job),
        Err(e) => Err(e.clone()),
    }
}
