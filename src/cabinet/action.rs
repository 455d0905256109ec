//! Busy/idle tracking for per-item actions such as upload.
//!
//! Each invocation owns a [`BusyGuard`]; the flag clears when the guard is
//! dropped, so a failed action releases its control the same way a
//! successful one does.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::item::{FolderId, ItemId};

/// Actions that can be triggered on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Upload,
}

/// Shared busy indicator for one control.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark busy, or `None` if the control is already busy.
    pub fn acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(self.clone()))
    }
}

/// Holds a control busy until dropped.
#[derive(Debug)]
pub struct BusyGuard(BusyFlag);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::Release);
    }
}

/// Item ids are only unique within one listing, so a control is the
/// action plus the folder and id of the row it was triggered on.
type ControlKey = (ActionKind, FolderId, ItemId);

/// Busy flags for every control that has been triggered.
#[derive(Debug, Default)]
pub struct ActionState {
    flags: HashMap<ControlKey, BusyFlag>,
}

impl ActionState {
    /// Start `kind` on item `id` of `folder`. Returns `None` while a previous
    /// invocation on the same control is still running.
    pub fn begin(&mut self, kind: ActionKind, folder: &FolderId, id: &ItemId) -> Option<BusyGuard> {
        self.flags
            .entry((kind, folder.clone(), id.clone()))
            .or_default()
            .acquire()
    }

    pub fn is_busy(&self, kind: ActionKind, folder: &FolderId, id: &ItemId) -> bool {
        self.flags
            .get(&(kind, folder.clone(), id.clone()))
            .is_some_and(BusyFlag::is_busy)
    }

    /// Number of actions currently running.
    pub fn busy_count(&self) -> usize {
        self.flags.values().filter(|f| f.is_busy()).count()
    }

    /// Forget flags that are idle.
    pub fn prune(&mut self) {
        self.flags.retain(|_, flag| flag.is_busy());
    }
}

/// Run `perform`, then wait `settle` whatever the outcome, then release the
/// guard. Failures are logged and swallowed.
pub async fn run_settled<F, Fut, T, E>(guard: BusyGuard, settle: Duration, perform: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let outcome = perform().await;
    tokio::time::sleep(settle).await;
    drop(guard);

    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(error = %e, "action failed");
            None
        }
    }
}
