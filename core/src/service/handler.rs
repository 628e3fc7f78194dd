use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use crate::actor::{ActorId, Visibility};
use crate::error::ServiceError;
use crate::signals::DamageSignal;

use super::{EntryStatus, ServiceCommand, ServiceStats};

// ─────────────────────────────────────────────────────────────────────────────
// Service Handle (for host glue)
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to communicate with the tracking service
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    cmd_tx: mpsc::Sender<ServiceCommand>,
}

impl ServiceHandle {
    pub(super) fn new(cmd_tx: mpsc::Sender<ServiceCommand>) -> Self {
        Self { cmd_tx }
    }

    /// Queue a host signal, waiting for room if the queue is full
    pub async fn send(&self, signal: DamageSignal) -> Result<(), ServiceError> {
        self.cmd_tx
            .send(ServiceCommand::Signal(signal))
            .await
            .map_err(|_| ServiceError::Stopped)
    }

    /// Queue a host signal without waiting. For synchronous host callbacks
    /// that must not stall the game loop.
    pub fn try_send(&self, signal: DamageSignal) -> Result<(), ServiceError> {
        self.cmd_tx
            .try_send(ServiceCommand::Signal(signal))
            .map_err(|e| match e {
                TrySendError::Full(_) => ServiceError::Busy,
                TrySendError::Closed(_) => ServiceError::Stopped,
            })
    }

    /// Flip an actor's counter visibility, returning the new state
    pub async fn toggle_notifications(&self, actor: ActorId) -> Result<Visibility, ServiceError> {
        self.request(|reply| ServiceCommand::ToggleNotifications { actor, reply })
            .await
    }

    /// Current total for an actor, if any
    pub async fn entry(&self, actor: ActorId) -> Result<Option<EntryStatus>, ServiceError> {
        self.request(|reply| ServiceCommand::Entry { actor, reply })
            .await
    }

    /// Run a sweep immediately, returning how many entries were evicted
    pub async fn sweep_now(&self) -> Result<usize, ServiceError> {
        self.request(ServiceCommand::SweepNow).await
    }

    pub async fn stats(&self) -> Result<ServiceStats, ServiceError> {
        self.request(ServiceCommand::Stats).await
    }

    pub(super) async fn shutdown(&self) -> Result<(), ServiceError> {
        self.cmd_tx
            .send(ServiceCommand::Shutdown)
            .await
            .map_err(|_| ServiceError::Stopped)
    }

    async fn request<T, F>(&self, make: F) -> Result<T, ServiceError>
    where
        F: FnOnce(oneshot::Sender<T>) -> ServiceCommand,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.cmd_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| ServiceError::Stopped)?;
        reply_rx.await.map_err(|_| ServiceError::Stopped)
    }
}
