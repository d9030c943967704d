//! The process-wide log level.
//!
//! `lasttab --log <level>` sets the level before the host starts.  When it is unset,
//! the level comes from the build: `diagnostics` builds log at debug, release builds only log warnings.
use std::sync::atomic::{AtomicU8, Ordering};

use log::LevelFilter;

// 0 is unset
static LOG_LEVEL: AtomicU8 = AtomicU8::new(0);

pub fn set_level(level: LevelFilter) {
    LOG_LEVEL.store(discriminant_of(level), Ordering::SeqCst);
}

pub fn get_level() -> Option<LevelFilter> {
    level_of(LOG_LEVEL.load(Ordering::SeqCst))
}

/// The configured level, or the build default.
pub fn effective_level() -> LevelFilter {
    get_level().unwrap_or_else(default_level)
}

pub fn default_level() -> LevelFilter {
    if cfg!(feature = "diagnostics") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Parses a `--log` argument value
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

// LevelFilter has a from_usize method, but it's private
fn discriminant_of(filter: LevelFilter) -> u8 {
    match filter {
        LevelFilter::Off => 1,
        LevelFilter::Error => 2,
        LevelFilter::Warn => 3,
        LevelFilter::Info => 4,
        LevelFilter::Debug => 5,
        LevelFilter::Trace => 6,
    }
}

fn level_of(discriminant: u8) -> Option<LevelFilter> {
    match discriminant {
        1 => Some(LevelFilter::Off),
        2 => Some(LevelFilter::Error),
        3 => Some(LevelFilter::Warn),
        4 => Some(LevelFilter::Info),
        5 => Some(LevelFilter::Debug),
        6 => Some(LevelFilter::Trace),
        _ => None,
    }
}
