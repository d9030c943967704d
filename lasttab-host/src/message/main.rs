use lasttab_api::shortcut::Shortcut;
use lifeline::impl_storage_clone;
use std::path::PathBuf;

/// Terminates the host process.  Sent when the browser closes the native messaging port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainShutdown {}

/// The configured shortcut, and the manifest command it triggers.
///
/// Stored as a resource on the `MainBus`, and read by the `ShortcutService` on startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub command: String,
    pub shortcut: Shortcut,
    /// The config file that valid shortcut changes are saved to
    pub config_path: PathBuf,
}

impl_storage_clone!(ShortcutBinding);
