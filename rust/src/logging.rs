//! Logging macros with verbosity level control.
//!
//! Events are routed through `tracing`; nothing is emitted below the
//! configured verbosity, and the host application decides where events go.
//! - 0: SILENT (only errors)
//! - 1: CHANGES (results: path chosen, bottlenecks ranked, risk level)
//! - 2: CHECKS (skipped edges, candidate selection)
//! - 3: DEBUG (full algorithm internals)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            $crate::tracing::info!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            $crate::tracing::debug!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            $crate::tracing::trace!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_macros_emit_through_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trace")
            .with_test_writer()
            .try_init();

        let verbosity = VERBOSITY_DEBUG;
        log_changes!(verbosity, "changes {}", 1);
        log_checks!(verbosity, task_id = "t1", "checks {}", 2);
        log_debug!(verbosity, "debug {}", 3);

        // Silent level must not evaluate into an event, but must still compile.
        log_debug!(VERBOSITY_SILENT, "never {}", 4);
    }
}
