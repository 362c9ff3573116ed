//! Structured logging for AppLink.
//!
//! This module provides logging support built on the standard [`log`]
//! facade. All AppLink crates use these logging utilities.
//!
//! # Log Levels
//!
//! - **warn**: misuse of the API that is absorbed rather than raised
//!   (e.g. assigning a correlation identifier to a notification)
//! - **debug**: lenient-read absorption: stored data that could not be
//!   interpreted as its declared kind
//! - **trace**: envelope framing details during encode/decode
//!
//! # Initialization
//!
//! AppLink does not include a log implementation. Applications should
//! initialize logging using their preferred backend:
//!
//! ```ignore
//! env_logger::init();
//! ```
//!
//! # Log Targets
//!
//! AppLink uses hierarchical log targets for filtering:
//!
//! - `applink`: root target for all AppLink logs
//! - `applink::store`: parameter store mutations
//! - `applink::struct`: typed accessor reads/writes and lazy conversion
//! - `applink::envelope`: message framing and correlation
//!
//! Example filter: `RUST_LOG=applink::struct=debug,applink::envelope=trace`

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

// Re-export log level types for programmatic use
pub use log::{Level, LevelFilter};

/// Log targets used by AppLink components.
///
/// Use these constants with the `target:` argument to log macros
/// for consistent filtering.
pub mod targets {
    /// Root target for all AppLink logs.
    pub const APPLINK: &str = "applink";

    /// Parameter store mutations.
    pub const STORE: &str = "applink::store";

    /// Typed accessor reads/writes and lazy struct conversion.
    pub const STRUCT: &str = "applink::struct";

    /// Message framing, categories, and correlation identifiers.
    pub const ENVELOPE: &str = "applink::envelope";
}

/// Returns whether logging is enabled at the given level for the given target.
///
/// Useful for conditionally computing expensive log message data.
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}
