//! File-watcher wrapper behind the `poll`/debounce contract (§4.8 steps 1-2).
//!
//! `notify` delivers raw filesystem events on its own thread via a
//! channel; this module collapses that stream into the three outcomes
//! the rest of the runtime needs to reason about.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use notify::{Event as NotifyEvent, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

use crate::error::{RuntimeError, RuntimeResult};

/// Reloads within this long of the last successful one are swallowed
/// (§4.8 step 2) rather than triggering a second reparse.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

pub enum PollResult {
    NoChanges,
    Reloaded(PathBuf),
    Error(RuntimeError),
}

/// Watches one source file for changes. Not `Clone`: the underlying
/// `notify` watcher owns OS resources (inotify fd, kqueue, …) for its
/// lifetime.
pub struct ReloadWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<NotifyEvent>>,
    watched_path: PathBuf,
    last_reload: Option<Instant>,
}

impl ReloadWatcher {
    pub fn new(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |event| {
            let _ = tx.send(event);
        })?;
        watcher.watch(&watched_path, RecursiveMode::NonRecursive)?;
        Ok(Self { _watcher: watcher, events: rx, watched_path, last_reload: None })
    }

    /// Non-blocking: drains whatever events have queued up and reports
    /// whether the watched file actually needs reparsing, applying the
    /// 500ms debounce against the last *successful* reload. Does not
    /// stamp the debounce clock itself — the caller owns deciding
    /// whether the reload this unblocks actually succeeds, and must call
    /// [`Self::mark_reloaded`] once it does. Otherwise a failed or
    /// vetoed reload would start the debounce window anyway, silently
    /// swallowing the very next legitimate save.
    pub fn poll(&mut self) -> PollResult {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(Ok(_event)) => changed = true,
                Ok(Err(err)) => return PollResult::Error(RuntimeError::Watch(err)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!(path = %self.watched_path.display(), "reload watcher channel disconnected");
                    break;
                }
            }
        }
        if !changed {
            return PollResult::NoChanges;
        }
        if let Some(last) = self.last_reload {
            if last.elapsed() < DEBOUNCE {
                return PollResult::NoChanges;
            }
        }
        PollResult::Reloaded(self.watched_path.clone())
    }

    /// Stamp the debounce clock against a confirmed successful reload.
    /// Call only after the caller has actually swapped in the reloaded
    /// tree; a veto, read failure, or compile error must not call this.
    pub fn mark_reloaded(&mut self) {
        self.last_reload = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_with_no_events_reports_no_changes() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("kryo_reload_test_{}.kry", std::process::id()));
        std::fs::write(&path, "Container { }").unwrap();
        let mut watcher = ReloadWatcher::new(&path).unwrap();
        assert!(matches!(watcher.poll(), PollResult::NoChanges));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn debounce_clock_only_advances_via_mark_reloaded() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("kryo_reload_test_mark_{}.kry", std::process::id()));
        std::fs::write(&path, "Container { }").unwrap();
        let mut watcher = ReloadWatcher::new(&path).unwrap();
        assert!(watcher.last_reload.is_none());
        watcher.mark_reloaded();
        assert!(watcher.last_reload.is_some());
        let _ = std::fs::remove_file(&path);
    }
}
