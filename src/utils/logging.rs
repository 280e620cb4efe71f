//! Logging macros gated on a per-module `ENABLE_LOGS` const.
//!
//! A module opts in by declaring the flag and importing what it needs:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_info, log_warn};
//!
//! log_info!("spin started");
//! ```
//! Flipping the const to `false` silences that module without touching
//! `RUST_LOG`, which is handy for the per-frame debug output of the wheel.

/// `log::info!` when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// `log::warn!` when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// `log::error!` when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// `log::debug!` when the calling module's `ENABLE_LOGS` is set.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Default level for `env_logger`: `Debug` when `PRIZEWHEEL_DEBUG` is on,
/// `Info` otherwise. `RUST_LOG` still overrides either.
pub fn default_level() -> log::LevelFilter {
    let debug_mode = std::env::var("PRIZEWHEEL_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if debug_mode {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

pub fn init() {
    let _ = env_logger::Builder::new()
        .filter_level(default_level())
        .parse_default_env()
        .try_init();
}
