//! Shared access to an index that is built in the background.
//!
//! Readers never block on the build: until a complete index has been
//! published they get [`IndexUnavailable`] and can report it. Publication
//! writes the index before the status flips to ready, so a reader that sees
//! `Ready` always finds the index in place.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::RwLock;

use crate::crawl::{crawl, IndexConfig};
use crate::error::{IndexError, IndexUnavailable};
use crate::index::SymbolIndex;

/// Build state of a [`SymbolIndexHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexStatus {
    NotStarted,
    Building,
    Ready,
    Failed,
}

impl IndexStatus {
    const fn to_u8(self) -> u8 {
        match self {
            IndexStatus::NotStarted => 0,
            IndexStatus::Building => 1,
            IndexStatus::Ready => 2,
            IndexStatus::Failed => 3,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => IndexStatus::NotStarted,
            1 => IndexStatus::Building,
            2 => IndexStatus::Ready,
            _ => IndexStatus::Failed,
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    index: RwLock<Option<Arc<SymbolIndex>>>,
    status: AtomicU8,
}

/// Cloneable handle to one symbol index and its build status.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndexHandle {
    shared: Arc<Shared>,
}

impl SymbolIndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that is already ready with `index`.
    pub fn with_index(index: SymbolIndex) -> Self {
        let handle = Self::new();
        handle.publish(index);
        handle
    }

    pub fn status(&self) -> IndexStatus {
        IndexStatus::from_u8(self.shared.status.load(Ordering::Acquire))
    }

    fn set_status(&self, status: IndexStatus) {
        self.shared.status.store(status.to_u8(), Ordering::Release);
    }

    /// The published index, or why there is none yet.
    pub fn snapshot(&self) -> Result<Arc<SymbolIndex>, IndexUnavailable> {
        match self.status() {
            IndexStatus::NotStarted => Err(IndexUnavailable::NotStarted),
            IndexStatus::Building => Err(IndexUnavailable::Building),
            IndexStatus::Failed => Err(IndexUnavailable::Failed),
            IndexStatus::Ready => self
                .shared
                .index
                .read()
                .as_ref()
                .map(Arc::clone)
                .ok_or(IndexUnavailable::Building),
        }
    }

    /// Make `index` visible to readers and mark the handle ready.
    pub fn publish(&self, index: SymbolIndex) {
        *self.shared.index.write() = Some(Arc::new(index));
        self.set_status(IndexStatus::Ready);
    }

    /// Drop any published index and return to `NotStarted`.
    pub fn reset(&self) {
        self.set_status(IndexStatus::NotStarted);
        *self.shared.index.write() = None;
    }

    /// Crawl on the current thread and publish the result.
    pub fn build_blocking(&self, config: &IndexConfig) -> Result<(), IndexError> {
        self.set_status(IndexStatus::Building);
        let start = std::time::Instant::now();
        match crawl(config) {
            Ok(index) => {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis(),
                    words = index.len(),
                    "symbol index ready"
                );
                self.publish(index);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "symbol index build failed");
                self.set_status(IndexStatus::Failed);
                Err(err)
            }
        }
    }

    /// Crawl on a dedicated thread. The status is `Building` when this
    /// returns and ends as `Ready` or `Failed`, also if the crawl panics.
    pub fn spawn_build(&self, config: IndexConfig) -> Result<JoinHandle<()>, IndexError> {
        self.set_status(IndexStatus::Building);
        let handle = self.clone();
        let spawned = std::thread::Builder::new()
            .name("sugg-index".to_owned())
            .spawn(move || {
                let mut guard = BuildGuard {
                    handle: handle.clone(),
                    finished: false,
                };
                // The error was logged and recorded in the status.
                let _ = handle.build_blocking(&config);
                guard.finished = true;
            });
        spawned.map_err(|err| {
            self.set_status(IndexStatus::Failed);
            IndexError::Spawn(err)
        })
    }
}

/// Marks the build failed if the worker unwinds before finishing.
struct BuildGuard {
    handle: SymbolIndexHandle,
    finished: bool,
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("symbol index worker panicked");
            self.handle.set_status(IndexStatus::Failed);
        }
    }
}
