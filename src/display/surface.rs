//! Display-surface task queue
//!
//! Window-mutating work must execute on the single thread that owns the
//! display surface. The kiosk controller posts a unit of work here and
//! awaits its completion over a oneshot; the surface owner drains the
//! queue on its own thread. The caller's thread is never blocked
//! synchronously.
//!
//! Hosts with an existing surface-side event loop pump the queue with
//! [`SurfaceQueue::dispatch_pending`]; hosts without one dedicate a
//! thread via [`spawn`].

use anyhow::Result;
use log::info;
use tokio::sync::{mpsc, oneshot};

use super::DisplayController;

/// Unit of window work executed on the surface thread
pub type SurfaceJob = Box<dyn FnOnce(&mut dyn DisplayController) -> Result<()> + Send>;

/// Queue depth for pending surface jobs. Mutations are host-serialized,
/// so at most one is normally in flight.
const QUEUE_DEPTH: usize = 16;

/// The surface owner dropped its queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGone;

struct Envelope {
    job: SurfaceJob,
    done: oneshot::Sender<Result<()>>,
}

/// Posting side, held by the kiosk controller
#[derive(Clone)]
pub struct SurfaceHandle {
    tx: mpsc::Sender<Envelope>,
}

impl SurfaceHandle {
    /// Post a unit of work; its result arrives on the returned receiver.
    /// Fails immediately if the surface owner is gone.
    pub fn submit(&self, job: SurfaceJob) -> Result<oneshot::Receiver<Result<()>>, SurfaceGone> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .try_send(Envelope { job, done: done_tx })
            .map_err(|_| SurfaceGone)?;
        Ok(done_rx)
    }
}

/// Receiving side, owned by the display-surface thread
pub struct SurfaceQueue {
    rx: mpsc::Receiver<Envelope>,
}

impl SurfaceQueue {
    /// Execute pending jobs without blocking.
    ///
    /// Returns the number of jobs executed. For hosts that pump the
    /// queue from an existing surface-side event loop.
    pub fn dispatch_pending(&mut self, display: &mut dyn DisplayController) -> usize {
        let mut executed = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            let result = (envelope.job)(display);
            let _ = envelope.done.send(result);
            executed += 1;
        }
        executed
    }

    /// Drain the queue until every handle is dropped.
    ///
    /// Blocks the calling thread; for hosts that dedicate a thread to
    /// the surface. Must not be called from async context.
    pub fn run(mut self, display: &mut dyn DisplayController) {
        while let Some(envelope) = self.rx.blocking_recv() {
            let result = (envelope.job)(display);
            let _ = envelope.done.send(result);
        }
        info!("Surface queue closed");
    }
}

/// Create a surface queue pair
pub fn channel() -> (SurfaceHandle, SurfaceQueue) {
    let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
    (SurfaceHandle { tx }, SurfaceQueue { rx })
}

/// Spawn a dedicated surface thread draining the queue against `display`.
///
/// The thread exits once every [`SurfaceHandle`] is dropped.
pub fn spawn<D>(mut display: D) -> (SurfaceHandle, std::thread::JoinHandle<()>)
where
    D: DisplayController + Send + 'static,
{
    let (handle, queue) = channel();
    let join = std::thread::spawn(move || queue.run(&mut display));
    (handle, join)
}
