use lasttab_api::{
    tab::TabId,
    window::{WindowId, WindowInfo},
};
use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

/// The two most recently active tabs of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyRecord {
    pub current: TabId,
    pub previous: Option<TabId>,
}

impl RecencyRecord {
    pub fn new(current: TabId) -> Self {
        Self {
            current,
            previous: None,
        }
    }
}

/// Why a window has no tab to switch back to.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentTabError {
    #[error("window {0} is not tracked")]
    UnknownWindow(WindowId),
    #[error("window {0} has no recent tab")]
    NoRecentTab(WindowId),
}

/// Tracks the current and previous tab of each open window.
///
/// Records are created on the first activation (or by the startup snapshot),
/// and dropped when the window is removed.  Nothing is persisted.
#[derive(Debug, Default)]
pub struct RecencyTracker {
    windows: HashMap<WindowId, RecencyRecord>,
}

impl RecencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn get(&self, window: WindowId) -> Option<&RecencyRecord> {
        self.windows.get(&window)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Shifts `current` into `previous`, and records the tab as current.
    ///
    /// A repeated activation of the current tab still shifts.
    pub fn record_activation(&mut self, window: WindowId, tab: TabId) {
        match self.windows.get_mut(&window) {
            Some(record) => {
                record.previous = Some(record.current);
                record.current = tab;
            }
            None => {
                self.windows.insert(window, RecencyRecord::new(tab));
            }
        }
    }

    pub fn remove_window(&mut self, window: WindowId) {
        if self.windows.remove(&window).is_some() {
            debug!("stopped tracking window {}", window);
        }
    }

    /// Forgets a closed tab.
    ///
    /// If the closed tab was current, the previous tab is promoted to current.
    /// The browser activates a replacement next, which shifts the promoted tab back into `previous`.
    /// When the replacement is the promoted tab itself (Firefox's `selectOwnerOnClose`),
    /// the record holds that tab in both slots, and the next switch re-activates the tab already shown
    /// until another activation shifts it out.
    /// A window with no previous tab becomes untracked until its next activation.
    pub fn remove_tab(&mut self, window: WindowId, tab: TabId) {
        let record = match self.windows.get_mut(&window) {
            Some(record) => record,
            None => return,
        };

        if record.current == tab {
            match record.previous.take().filter(|previous| *previous != tab) {
                Some(previous) => record.current = previous,
                None => {
                    self.windows.remove(&window);
                }
            }
        } else if record.previous == Some(tab) {
            record.previous = None;
        }
    }

    /// Resolves the tab that was active before the current one.
    pub fn query_last(&self, window: WindowId) -> Result<TabId, RecentTabError> {
        let record = self
            .windows
            .get(&window)
            .ok_or(RecentTabError::UnknownWindow(window))?;

        record.previous.ok_or(RecentTabError::NoRecentTab(window))
    }

    /// Seeds a record for each normal window in the snapshot, using its active tab.
    ///
    /// Windows that already have a record were activated after the snapshot was requested, and are kept.
    /// Returns the number of windows seeded.
    pub fn initialize_from_snapshot(&mut self, windows: &[WindowInfo]) -> usize {
        let mut seeded = 0;

        for window in windows {
            if !window.is_normal() {
                debug!(
                    "skipping window {} of type {:?}",
                    window.id, window.window_type
                );
                continue;
            }

            let tab = match window.single_active_tab() {
                Ok(tab) => tab,
                Err(count) => {
                    warn!(
                        "skipping window {}: expected one active tab, found {}",
                        window.id, count
                    );
                    continue;
                }
            };

            if self.windows.contains_key(&window.id) {
                debug!("window {} is already tracked", window.id);
                continue;
            }

            debug!("window {} has active tab {}", window.id, tab);
            self.windows.insert(window.id, RecencyRecord::new(tab));
            seeded += 1;
        }

        seeded
    }
}
