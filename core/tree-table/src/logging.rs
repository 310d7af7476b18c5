//! FILENAME: core/tree-table/src/logging.rs
// PURPOSE: Category-tagged logging macros routed through the `log` facade.
// CONTEXT: The category becomes the log target, so hosts can filter on
//          "RENDER", "TREE", "SPAN", "TOGGLE" or "CONFIG".

// ============================================================================
// LEVEL MACROS
// ============================================================================

macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, $($arg)*)
    };
}

macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        ::log::warn!(target: $cat, $($arg)*)
    };
}

// ============================================================================
// ENTER/EXIT MACROS FOR FUNCTION TRACING
// ============================================================================

macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "ENTER {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "ENTER {} {}", $func, format_args!($($arg)*))
    };
}

macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        ::log::debug!(target: $cat, "EXIT {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}

macro_rules! log_exit_info {
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        ::log::info!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}
