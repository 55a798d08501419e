//! Service error types

use thiserror::Error;

/// Errors returned by kiosk operations.
///
/// Every failure is scoped to the single call that produced it: kiosk
/// state is left unchanged and the host may simply retry.
#[derive(Debug, Error)]
pub enum KioskError {
    /// The display surface (or its task queue) is gone.
    #[error("display surface not available")]
    SurfaceUnavailable,

    /// A collaborator failed while executing the operation.
    #[error("{context}: {cause:#}")]
    Collaborator {
        /// Which operation was in flight
        context: &'static str,
        /// Underlying collaborator error
        cause: anyhow::Error,
    },
}

impl KioskError {
    pub(crate) fn collaborator(context: &'static str, cause: anyhow::Error) -> Self {
        Self::Collaborator { context, cause }
    }

    /// Underlying collaborator error, if any.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Collaborator { cause, .. } => Some(cause),
            Self::SurfaceUnavailable => None,
        }
    }
}
