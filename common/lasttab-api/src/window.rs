use crate::tab::{TabId, TabInfo};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The browser's identifier for a top-level window.  Unique within a browser session.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct WindowId(pub i64);

impl Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of browser window.  Only `Normal` windows take part in tab switching.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    Normal,
    Popup,
    Panel,
    App,
    Devtools,
    #[serde(other)]
    Unknown,
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Normal
    }
}

/// A window, as reported by `windows.getAll` or `windows.getCurrent`.
///
/// `tabs` is empty unless the request asked the host to populate it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    #[serde(rename = "type", default)]
    pub window_type: WindowType,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub tabs: Vec<TabInfo>,
}

impl WindowInfo {
    pub fn is_normal(&self) -> bool {
        self.window_type == WindowType::Normal
    }

    /// Returns the active tab, if the host reported exactly one.
    ///
    /// Returns the number of active tabs as the error otherwise.
    pub fn single_active_tab(&self) -> Result<TabId, usize> {
        let mut active = self.tabs.iter().filter(|tab| tab.active);

        match (active.next(), active.next()) {
            (Some(tab), None) => Ok(tab.id),
            (None, _) => Err(0),
            (Some(_), Some(_)) => Err(2 + active.count()),
        }
    }
}
