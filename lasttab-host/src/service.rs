pub mod dispatcher;
pub mod main;
pub mod native_host;
pub mod shortcut;
