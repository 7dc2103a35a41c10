//! Unified Logging Macros for the KNX codec
//!
//! This module provides a unified logging interface that automatically
//! selects between `log::` and `defmt::` based on the active feature flags.
//! With neither feature enabled the macro expands to nothing observable, but
//! its arguments are still type-checked.
//!
//! # Usage
//!
//! ```rust
//! use knxnetip_codec::knx_log;
//!
//! let code = 0x29u8;
//! knx_log!(trace, "cEMI message code {}", code);
//! knx_log!(warn, "reserved field mismatch");
//! ```
//!
//! Format strings must stay within the subset understood by both backends:
//! plain `{}` placeholders and primitive arguments.
//!
//! # Feature Flags
//!
//! - `log` - Uses the `log::` facade (host tooling, USB serial)
//! - `defmt` - Uses `defmt::` (more efficient for embedded)
//! - neither - logging is compiled out

/// Unified logging macro - automatically selects log:: or defmt:: based on features
#[macro_export]
#[cfg(feature = "log")]
macro_rules! knx_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! knx_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! knx_log {
    ($level:ident, $($arg:tt)*) => {{
        if false {
            let _ = ($($arg)*);
        }
    }};
}
