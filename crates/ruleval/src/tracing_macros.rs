//! Conditional tracing macros
//!
//! Validation runs inside request handlers and batch jobs alike, so logging
//! is opt-out: without the `tracing` feature these expand to nothing.

/// Log at warn level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

/// Log at warn level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

/// Log at debug level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

/// Log at debug level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Log at trace level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
macro_rules! trace_trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

/// Log at trace level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace_trace {
    ($($arg:tt)*) => {};
}
