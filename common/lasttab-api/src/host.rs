use crate::{
    tab::TabId,
    window::{WindowId, WindowInfo, WindowType},
};
use serde::{Deserialize, Serialize};

/// The shortcut command registered by the extension manifest.
pub const MOST_RECENT_TAB_COMMAND: &str = "most-recent-tab-command";

/// A notification delivered by the browser extension, over stdin.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A tab became the active tab in its window (`tabs.onActivated`)
    #[serde(rename_all = "camelCase")]
    TabActivated { tab_id: TabId, window_id: WindowId },

    /// A tab was closed (`tabs.onRemoved`)
    ///
    /// When the whole window is closing, `is_window_closing` is set and a `WindowRemoved` follows.
    #[serde(rename_all = "camelCase")]
    TabRemoved {
        tab_id: TabId,
        window_id: WindowId,
        #[serde(default)]
        is_window_closing: bool,
    },

    /// A window was destroyed (`windows.onRemoved`)
    #[serde(rename_all = "camelCase")]
    WindowRemoved { window_id: WindowId },

    /// The focused window changed (`windows.onFocusChanged`)
    #[serde(rename_all = "camelCase")]
    WindowFocusChanged { window_id: WindowId },

    /// A keyboard shortcut was pressed (`commands.onCommand`)
    Command { command: String },

    /// The toolbar icon was clicked
    ActionClicked,

    /// Another extension asked for a switch (`runtime.onMessageExternal`)
    ExternalMessage {
        #[serde(default)]
        sender: Option<String>,
    },

    /// The reply to `HostRequest::GetAllWindows`
    AllWindows { windows: Vec<WindowInfo> },

    /// The reply to `HostRequest::GetCurrentWindow`
    CurrentWindow { window: WindowInfo },

    /// A request could not be serviced, e.g. the tab to activate no longer exists
    RequestFailed { request: String, error: String },

    /// The shortcut in the extension's configuration store changed
    ShortcutChanged { shortcut: String },
}

/// A request to the browser extension, written to stdout.
///
/// Requests are fire-and-forget.  Replies arrive later as `HostEvent`s.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    /// Lists the open windows (`windows.getAll`)
    #[serde(rename_all = "camelCase")]
    GetAllWindows {
        populate: bool,
        window_types: Vec<WindowType>,
    },

    /// Resolves the current window (`windows.getCurrent`)
    GetCurrentWindow { populate: bool },

    /// Makes the tab the active tab of its window (`tabs.update(id, {active: true})`)
    #[serde(rename_all = "camelCase")]
    ActivateTab { tab_id: TabId },

    /// Rebinds the named shortcut command (`commands.update`)
    UpdateCommand { name: String, shortcut: String },
}

impl HostRequest {
    /// The startup scan of all normal windows, with their tabs
    pub fn scan_windows() -> Self {
        HostRequest::GetAllWindows {
            populate: true,
            window_types: vec![WindowType::Normal],
        }
    }
}
