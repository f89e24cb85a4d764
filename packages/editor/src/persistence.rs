//! # Persistence worker
//!
//! History hands every committed snapshot to a [`Persister`]. A single tokio
//! task drains the queue and calls the [`PersistenceBackend`]:
//!
//! - sends never block the editor
//! - status turns `Pending` as soon as a newer snapshot is submitted
//! - queued saves are coalesced to the newest version
//! - a snapshot not newer than the last successful save is dropped, so a
//!   slow stale write never overwrites a later version
//! - failures are published on the status channel and kept for [`Persister::retry`]

use crate::history::VersionedSnapshot;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Save rejected: {0}")]
    Rejected(String),
}

/// Storage collaborator. Retry and backoff policy belong to the implementation.
pub trait PersistenceBackend: Send + Sync + 'static {
    fn save(&self, snapshot: VersionedSnapshot) -> BoxFuture<'_, Result<(), PersistError>>;
}

/// Observable save state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Pending { version: u64 },
    Saved { version: u64 },
    Failed { version: u64, error: PersistError },
}

impl SaveStatus {
    /// True when the latest change may not be in storage
    pub fn is_unsaved(&self) -> bool {
        matches!(self, SaveStatus::Pending { .. } | SaveStatus::Failed { .. })
    }
}

#[derive(Debug)]
enum Command {
    Save(VersionedSnapshot),
    Retry,
}

/// Handle to the background save worker
pub struct Persister {
    commands: mpsc::UnboundedSender<Command>,
    publisher: Arc<watch::Sender<SaveStatus>>,
    status: watch::Receiver<SaveStatus>,
    /// Highest version ever submitted
    queued: Arc<AtomicU64>,
    worker: JoinHandle<()>,
}

impl Persister {
    /// Spawn the worker on the current tokio runtime
    pub fn spawn(backend: Arc<dyn PersistenceBackend>) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(SaveStatus::Idle);
        let publisher = Arc::new(status_tx);
        let queued = Arc::new(AtomicU64::new(0));
        let worker = tokio::spawn(run_worker(backend, receiver, publisher.clone(), queued.clone()));

        Self {
            commands,
            publisher,
            status,
            queued,
            worker,
        }
    }

    /// Queue a snapshot for saving
    pub fn submit(&self, snapshot: VersionedSnapshot) {
        let version = snapshot.version;
        self.queued.fetch_max(version, Ordering::SeqCst);
        if self.commands.send(Command::Save(snapshot)).is_err() {
            warn!(version, "persistence worker has stopped; snapshot not queued");
            return;
        }
        self.publisher.send_if_modified(|status| match status {
            SaveStatus::Pending { version: current } | SaveStatus::Saved { version: current } if *current >= version => {
                false
            }
            _ => {
                *status = SaveStatus::Pending { version };
                true
            }
        });
    }

    /// Re-submit the last failed snapshot, unless something newer was saved
    pub fn retry(&self) {
        if self.commands.send(Command::Retry).is_err() {
            warn!("persistence worker has stopped; retry ignored");
            return;
        }
        self.publisher.send_if_modified(|status| match status {
            SaveStatus::Failed { version, .. } => {
                *status = SaveStatus::Pending { version: *version };
                true
            }
            _ => false,
        });
    }

    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    /// Stop accepting work, drain the queue and wait for the worker to exit
    pub async fn shutdown(self) -> SaveStatus {
        let Persister {
            commands,
            status,
            worker,
            ..
        } = self;
        drop(commands);
        if let Err(e) = worker.await {
            warn!(error = %e, "persistence worker panicked");
        }
        let last = status.borrow().clone();
        last
    }
}

impl std::fmt::Debug for Persister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persister").field("status", &*self.status.borrow()).finish()
    }
}

async fn run_worker(
    backend: Arc<dyn PersistenceBackend>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    status: Arc<watch::Sender<SaveStatus>>,
    queued: Arc<AtomicU64>,
) {
    let mut last_saved: Option<u64> = None;
    let mut failed: Option<VersionedSnapshot> = None;

    while let Some(command) = commands.recv().await {
        let mut latest = None;
        let mut retry = false;
        for command in std::iter::once(command).chain(std::iter::from_fn(|| commands.try_recv().ok())) {
            match command {
                Command::Save(snapshot) => {
                    if latest
                        .as_ref()
                        .map_or(true, |queued: &VersionedSnapshot| snapshot.version > queued.version)
                    {
                        latest = Some(snapshot);
                    }
                }
                Command::Retry => retry = true,
            }
        }
        if latest.is_none() && retry {
            latest = failed.take();
        }

        let Some(snapshot) = latest else {
            continue;
        };
        let version = snapshot.version;
        if let Some(saved) = last_saved.filter(|saved| version <= *saved) {
            debug!(version, saved, "dropping stale snapshot");
            status.send_if_modified(|current| match current {
                SaveStatus::Pending { version: pending } if *pending <= saved => {
                    *current = SaveStatus::Saved { version: saved };
                    true
                }
                _ => false,
            });
            continue;
        }

        status.send_replace(SaveStatus::Pending {
            version: queued.load(Ordering::SeqCst).max(version),
        });
        match backend.save(snapshot.clone()).await {
            Ok(()) => {
                info!(version, "snapshot saved");
                last_saved = Some(version);
                failed = None;
                // a newer submission still waiting keeps the document unsaved
                let newest = queued.load(Ordering::SeqCst);
                status.send_replace(if newest > version {
                    SaveStatus::Pending { version: newest }
                } else {
                    SaveStatus::Saved { version }
                });
            }
            Err(error) => {
                warn!(version, %error, "snapshot save failed");
                failed = Some(snapshot);
                status.send_replace(SaveStatus::Failed { version, error });
            }
        }
    }

    debug!("persistence worker stopped");
}
