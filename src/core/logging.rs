//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): Uses defmt
//! - Host tests: Uses println!
//! - Host non-test: No-op; arguments are still type-checked and count as used
//!
//! Format strings must stay within what both backends accept: `{}` with
//! integers, `bool` and `&str` arguments.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        #[allow(clippy::match_single_binding)]
        match ::core::format_args!($($arg)*) {
            _args => {
                #[cfg(test)]
                println!("[INFO] {}", _args);
            }
        }
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        #[allow(clippy::match_single_binding)]
        match ::core::format_args!($($arg)*) {
            _args => {
                #[cfg(test)]
                println!("[WARN] {}", _args);
            }
        }
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        #[allow(clippy::match_single_binding)]
        match ::core::format_args!($($arg)*) {
            _args => {
                #[cfg(test)]
                eprintln!("[ERROR] {}", _args);
            }
        }
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        #[allow(clippy::match_single_binding)]
        match ::core::format_args!($($arg)*) {
            _args => {
                #[cfg(test)]
                println!("[DEBUG] {}", _args);
            }
        }
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        #[allow(clippy::match_single_binding)]
        match ::core::format_args!($($arg)*) {
            _args => {
                #[cfg(test)]
                println!("[TRACE] {}", _args);
            }
        }
    }};
}
