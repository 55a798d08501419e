//! Request/response channel adapter
//!
//! Bridges an embedding host to the service over a bounded channel:
//! requests go in paired with a oneshot for the reply, and [`serve`]
//! drains them against the service in the host's loop. Failures cross
//! the channel as [`Fault`]s carrying the operation message plus the
//! collaborator cause chain.

use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::{KioskService, Request, Response};
use crate::error::KioskError;

/// Queue depth for pending host requests
const QUEUE_DEPTH: usize = 64;

/// Wire form of an operation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Operation-level message
    pub message: String,
    /// Underlying collaborator error chain, if any
    pub cause: Option<String>,
}

impl Fault {
    fn service_gone() -> Self {
        Self {
            message: "kiosk service not available".to_string(),
            cause: None,
        }
    }
}

impl From<KioskError> for Fault {
    fn from(err: KioskError) -> Self {
        match err {
            KioskError::Collaborator { context, cause } => Self {
                message: context.to_string(),
                cause: Some(format!("{cause:#}")),
            },
            other => Self {
                message: other.to_string(),
                cause: None,
            },
        }
    }
}

struct Envelope {
    request: Request,
    reply: oneshot::Sender<Result<Response, Fault>>,
}

/// Host-side handle to a served kiosk service
#[derive(Clone)]
pub struct ServiceHandle {
    tx: mpsc::Sender<Envelope>,
}

impl ServiceHandle {
    /// Issue one operation and await its result.
    ///
    /// A dropped serve loop surfaces as a [`Fault`], not a panic.
    pub async fn call(&self, request: Request) -> Result<Response, Fault> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = Envelope {
            request,
            reply: reply_tx,
        };
        if self.tx.send(envelope).await.is_err() {
            return Err(Fault::service_gone());
        }
        match reply_rx.await {
            Ok(result) => result,
            Err(_) => Err(Fault::service_gone()),
        }
    }
}

/// Receiving side for [`serve`]
pub struct RequestQueue {
    rx: mpsc::Receiver<Envelope>,
}

/// Create a handle/queue pair for [`serve`]
pub fn channel() -> (ServiceHandle, RequestQueue) {
    let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
    (ServiceHandle { tx }, RequestQueue { rx })
}

/// Drain host requests against the service until every handle is
/// dropped. Runs inside the host's loop; the service stays owned by the
/// host so the synchronous key-dispatch hook remains reachable between
/// polls.
pub async fn serve(service: &mut KioskService, mut queue: RequestQueue) {
    while let Some(envelope) = queue.rx.recv().await {
        let result = service.handle(envelope.request).await.map_err(Fault::from);
        let _ = envelope.reply.send(result);
    }
    info!("Host channel closed");
}
