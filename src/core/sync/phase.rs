use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

/// In-memory lifecycle of the engine. Nothing here survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum SyncPhase {
    Idle,
    CheckingUpdate,
    UpToDate,
    UpdateAvailable,
    /// `current` files of `total` have been written so far.
    Installing { current: usize, total: usize },
    Finalizing,
    Uninstalling,
    Failed { message: String },
}

impl SyncPhase {
    /// Busy phases block every other operation from starting.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SyncPhase::CheckingUpdate
                | SyncPhase::Installing { .. }
                | SyncPhase::Finalizing
                | SyncPhase::Uninstalling
        )
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncPhase::Idle => write!(f, "idle"),
            SyncPhase::CheckingUpdate => write!(f, "checking for updates"),
            SyncPhase::UpToDate => write!(f, "up to date"),
            SyncPhase::UpdateAvailable => write!(f, "update available"),
            SyncPhase::Installing { current, total } => {
                write!(f, "installing ({current}/{total})")
            }
            SyncPhase::Finalizing => write!(f, "finalizing"),
            SyncPhase::Uninstalling => write!(f, "uninstalling"),
            SyncPhase::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Transition guard around the current [`SyncPhase`].
///
/// Observers can follow the phase through [`SyncState::subscribe`].
#[derive(Debug)]
pub struct SyncState {
    tx: watch::Sender<SyncPhase>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SyncPhase::Idle);
        Self { tx }
    }

    pub fn phase(&self) -> SyncPhase {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncPhase> {
        self.tx.subscribe()
    }

    /// Enter the busy phase `next`, or fail with [`LauncherError::Busy`] if
    /// another operation holds the engine.
    pub fn begin(&self, next: SyncPhase) -> LauncherResult<PhaseGuard<'_>> {
        let mut blocked_by = None;
        self.tx.send_if_modified(|phase| {
            if phase.is_busy() {
                blocked_by = Some(phase.clone());
                false
            } else {
                debug!("Sync phase: {} -> {}", phase, next);
                *phase = next;
                true
            }
        });

        match blocked_by {
            Some(current) => Err(LauncherError::Busy(current.to_string())),
            None => Ok(PhaseGuard {
                state: self,
                settled: false,
            }),
        }
    }

    fn set(&self, next: SyncPhase) {
        self.tx.send_if_modified(|phase| {
            if *phase == next {
                return false;
            }
            debug!("Sync phase: {} -> {}", phase, next);
            *phase = next;
            true
        });
    }
}

/// Held for the duration of one operation. Dropping it without settling
/// (e.g. the future was aborted) marks the engine as failed.
#[derive(Debug)]
pub struct PhaseGuard<'a> {
    state: &'a SyncState,
    settled: bool,
}

impl PhaseGuard<'_> {
    pub fn advance(&self, next: SyncPhase) {
        self.state.set(next);
    }

    pub fn settle(mut self, last: SyncPhase) {
        self.settled = true;
        self.state.set(last);
    }

    pub fn fail(self, error: &LauncherError) {
        self.settle(SyncPhase::Failed {
            message: error.to_string(),
        });
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.set(SyncPhase::Failed {
                message: "interrupted".into(),
            });
        }
    }
}
