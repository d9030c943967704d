use crate::window::WindowId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The browser's identifier for a tab.  Unique within a browser session.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct TabId(pub i64);

impl Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tab, as reported by a populated `windows.getAll` or `windows.getCurrent` call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    #[serde(default)]
    pub active: bool,
}
