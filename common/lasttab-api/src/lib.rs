//! Shared API, exported to `lasttab-host` and `lasttab`
//!
//! All communication with the browser extension is described in this crate.

pub mod codec;
pub mod config;
pub mod host;
pub mod log;
pub mod shortcut;
pub mod tab;
pub mod window;
