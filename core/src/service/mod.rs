//! Tracking service
//!
//! Runs a [`DamageTracker`] inside one tokio task so hosts that deliver
//! events from several threads still get serialized access. Every command
//! and every sweep tick is handled to completion before the next one, so
//! read-decide-write on an entry is atomic.
//!
//! ```text
//!  host threads ──ServiceHandle──▶ mpsc ──▶ ┌──────────────────────┐
//!                                           │ service task         │
//!                 sweep interval ─────────▶ │   DamageTracker      │──▶ NotificationSink
//!                                           └──────────────────────┘
//! ```

mod handler;

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::actor::{ActorId, Visibility};
use crate::clock::{Clock, SystemClock};
use crate::error::ServiceError;
use crate::notify::NotificationSink;
use crate::signals::{DamageSignal, SignalHandler};
use crate::tracking::{DamageTracker, TrackerSettings};

pub use handler::ServiceHandle;

/// Command queue depth. Host callbacks use `try_send` and drop on overflow.
const COMMAND_QUEUE_DEPTH: usize = 1024;

/// Shortest sweep period the timer accepts. Hand-built settings below this
/// are raised to it.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Commands accepted by the service task
#[derive(Debug)]
pub enum ServiceCommand {
    Signal(DamageSignal),
    ToggleNotifications {
        actor: ActorId,
        reply: oneshot::Sender<Visibility>,
    },
    Entry {
        actor: ActorId,
        reply: oneshot::Sender<Option<EntryStatus>>,
    },
    SweepNow(oneshot::Sender<usize>),
    Stats(oneshot::Sender<ServiceStats>),
    Shutdown,
}

/// An actor's total as seen from outside the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryStatus {
    pub total: f64,
    /// Time until the entry becomes eligible for eviction.
    pub remaining: Duration,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceStats {
    pub tracked: usize,
    pub preferences: usize,
    pub sweeps: u64,
    pub evicted: u64,
}

/// A running tracking service. Dropping it without `stop` leaves the task
/// running until every [`ServiceHandle`] is dropped.
pub struct TrackingService {
    handle: ServiceHandle,
    task: JoinHandle<()>,
}

impl TrackingService {
    /// Spawn the service on the current tokio runtime.
    pub fn start<S>(settings: TrackerSettings, sink: S) -> Self
    where
        S: NotificationSink + Send + 'static,
    {
        Self::start_with_clock(settings, sink, SystemClock)
    }

    pub fn start_with_clock<S, C>(settings: TrackerSettings, sink: S, clock: C) -> Self
    where
        S: NotificationSink + Send + 'static,
        C: Clock + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let tracker = DamageTracker::with_clock(settings, sink, clock);
        let task = tokio::spawn(run(tracker, cmd_rx));
        Self {
            handle: ServiceHandle::new(cmd_tx),
            task,
        }
    }

    pub fn handle(&self) -> ServiceHandle {
        self.handle.clone()
    }

    /// Cancel the sweep timer, clear all state and wait for the task to exit.
    pub async fn stop(self) -> Result<(), ServiceError> {
        // The task may already be gone if every other path shut it down
        let _ = self.handle.shutdown().await;
        self.task.await.map_err(|_| ServiceError::Stopped)
    }
}

async fn run<S, C>(mut tracker: DamageTracker<S, C>, mut rx: mpsc::Receiver<ServiceCommand>)
where
    S: NotificationSink,
    C: Clock,
{
    let mut period = tracker.settings().sweep_interval;
    if period < MIN_SWEEP_INTERVAL {
        warn!(sweep_interval = ?period, "Sweep interval too short, using minimum");
        period = MIN_SWEEP_INTERVAL;
    }
    // First sweep is one full period after start
    let mut sweep = time::interval_at(time::Instant::now() + period, period);
    sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut stats = ServiceStats::default();
    info!(
        sweep_interval = ?period,
        decay_window = ?tracker.settings().decay_window,
        "Damage tracking started"
    );

    loop {
        tokio::select! {
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                if handle_command(&mut tracker, &mut stats, cmd).is_break() {
                    break;
                }
            }
            _ = sweep.tick() => {
                let evicted = tracker.sweep();
                stats.sweeps += 1;
                stats.evicted += evicted as u64;
            }
        }
    }

    let dropped = tracker.len();
    tracker.clear();
    info!(dropped, "Damage tracking stopped");
}

fn handle_command<S, C>(
    tracker: &mut DamageTracker<S, C>,
    stats: &mut ServiceStats,
    cmd: ServiceCommand,
) -> ControlFlow<()>
where
    S: NotificationSink,
    C: Clock,
{
    match cmd {
        ServiceCommand::Signal(signal) => tracker.handle_signal(&signal),
        ServiceCommand::ToggleNotifications { actor, reply } => {
            let _ = reply.send(tracker.toggle_notifications(actor));
        }
        ServiceCommand::Entry { actor, reply } => {
            let now = tracker.now();
            let status = tracker.entry(actor).map(|entry| EntryStatus {
                total: entry.total,
                remaining: entry.remaining(now),
                visibility: tracker.visibility(actor),
            });
            let _ = reply.send(status);
        }
        ServiceCommand::SweepNow(reply) => {
            let evicted = tracker.sweep();
            stats.sweeps += 1;
            stats.evicted += evicted as u64;
            let _ = reply.send(evicted);
        }
        ServiceCommand::Stats(reply) => {
            stats.tracked = tracker.len();
            stats.preferences = tracker.preference_count();
            let _ = reply.send(*stats);
        }
        ServiceCommand::Shutdown => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Limb;
    use crate::testing::{RecordingSink, UiCall};

    const A: ActorId = ActorId(1);
    const VICTIM: ActorId = ActorId(99);

    fn settings() -> TrackerSettings {
        TrackerSettings {
            decay_window: Duration::from_secs(3),
            sweep_interval: Duration::from_secs(5),
            ..TrackerSettings::default()
        }
    }

    fn hit(instigator: ActorId, damage: f32) -> DamageSignal {
        DamageSignal::PlayerDamaged {
            recipient: Some(VICTIM),
            instigator: Some(instigator),
            limb: Limb::Spine,
            damage,
            armor_multiplier: 1.0,
            allow: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_timer_evicts_after_first_interval() {
        let sink = RecordingSink::new();
        let service = TrackingService::start(settings(), sink.clone());
        let handle = service.handle();

        handle.send(hit(A, 5.0)).await.unwrap();
        assert_eq!(handle.entry(A).await.unwrap().unwrap().total, 5.0);

        // Expired at t=3 but the first sweep only runs at t=5
        time::sleep(Duration::from_millis(4900)).await;
        assert!(handle.entry(A).await.unwrap().is_some());

        time::sleep(Duration::from_millis(200)).await;
        assert!(handle.entry(A).await.unwrap().is_none());
        assert_eq!(sink.closes_for(A), 1);

        let stats = handle.stats().await.unwrap();
        assert_eq!(stats.sweeps, 1);
        assert_eq!(stats.evicted, 1);

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_senders_lose_no_updates() {
        let sink = RecordingSink::new();
        let service = TrackingService::start(settings(), sink.clone());

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let handle = service.handle();
            tasks.push(tokio::spawn(async move {
                for _ in 0..10 {
                    handle.send(hit(A, 1.0)).await.unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let status = service.handle().entry(A).await.unwrap().unwrap();
        assert_eq!(status.total, 100.0);
        assert_eq!(sink.opens_for(A), 1);
        assert_eq!(sink.texts_for(A).last().map(String::as_str), Some("100"));

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_through_handle() {
        let sink = RecordingSink::new();
        let service = TrackingService::start(settings(), sink.clone());
        let handle = service.handle();

        assert_eq!(handle.toggle_notifications(A).await.unwrap(), Visibility::Hidden);
        handle.send(hit(A, 8.0)).await.unwrap();

        let status = handle.entry(A).await.unwrap().unwrap();
        assert_eq!(status.visibility, Visibility::Hidden);
        assert_eq!(status.remaining, Duration::from_secs(3));
        assert!(sink.texts_for(A).is_empty());

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_clears_state_and_rejects_commands() {
        let sink = RecordingSink::new();
        let service = TrackingService::start(settings(), sink.clone());
        let handle = service.handle();

        handle.send(hit(A, 5.0)).await.unwrap();
        assert_eq!(handle.stats().await.unwrap().tracked, 1);

        service.stop().await.unwrap();

        assert_eq!(handle.send(hit(A, 5.0)).await, Err(ServiceError::Stopped));
        assert_eq!(handle.try_send(hit(A, 5.0)), Err(ServiceError::Stopped));
        assert_eq!(handle.stats().await, Err(ServiceError::Stopped));
        // Teardown does not close channels; the store is simply dropped
        assert!(!sink.calls().iter().any(|c| matches!(c, UiCall::Close { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_sweep_interval_still_runs() {
        let sink = RecordingSink::new();
        let settings = TrackerSettings {
            sweep_interval: Duration::ZERO,
            ..settings()
        };
        let service = TrackingService::start(settings, sink.clone());
        let handle = service.handle();

        handle.send(hit(A, 5.0)).await.unwrap();
        assert_eq!(handle.stats().await.unwrap().tracked, 1);

        time::sleep(Duration::from_millis(3100)).await;
        assert!(handle.entry(A).await.unwrap().is_none());
        assert_eq!(sink.closes_for(A), 1);

        service.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_command_ends_task() {
        let service = TrackingService::start(settings(), RecordingSink::new());
        let handle = service.handle();

        handle.shutdown().await.unwrap();
        // Task exits on its own; the join in stop still succeeds
        service.stop().await.unwrap();
        assert_eq!(handle.stats().await, Err(ServiceError::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_now_and_disconnect() {
        let sink = RecordingSink::new();
        let service = TrackingService::start(settings(), sink.clone());
        let handle = service.handle();

        handle.try_send(hit(A, 10.0)).unwrap();
        handle.try_send(hit(ActorId(2), 10.0)).unwrap();
        handle
            .try_send(DamageSignal::ParticipantDisconnected { actor: Some(A) })
            .unwrap();
        assert_eq!(handle.stats().await.unwrap().tracked, 1);

        time::advance(Duration::from_secs(4)).await;
        assert_eq!(handle.sweep_now().await.unwrap(), 1);
        assert_eq!(sink.closes_for(A), 0);
        assert_eq!(sink.closes_for(ActorId(2)), 1);

        service.stop().await.unwrap();
    }
}
