// SPDX-License-Identifier: MIT OR Apache-2.0

//! Variadic front ends for the leveled methods.
//!
//! Each macro takes a logger, then any number of `Display` arguments, then optionally `;` and
//! a [`Call`](crate::Call). The record is attributed to the invoking module.
//!
//! ```rust
//! # let _guard = multilog::hidden::test_guard();
//! # multilog::hidden::reset_for_test();
//! use multilog::{Call, WriterKind, get_logger};
//!
//! let logger = get_logger(Some("macros"));
//! multilog::info!(logger, "loaded", 3, "plugins");
//! multilog::ok!(logger, "ready"; Call::new().only(WriterKind::Console));
//! multilog::err!(logger, "lost connection to", "db-1");
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __leveled {
    ($method:ident, $logger:expr, $($arg:expr),+ ; $call:expr) => {
        $logger.$method(
            &[$(&$arg as &dyn ::std::fmt::Display),+],
            $call.in_module(::std::module_path!()),
        )
    };
    ($method:ident, $logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.$method(
            &[$(&$arg as &dyn ::std::fmt::Display),+],
            $crate::Call::new().in_module(::std::module_path!()),
        )
    };
}

/// Logs at `Debug`. See the [module docs](crate#the-api).
#[macro_export]
macro_rules! debug {
    ($($tt:tt)+) => { $crate::__leveled!(debug, $($tt)+) };
}

/// Logs at `Info`.
#[macro_export]
macro_rules! info {
    ($($tt:tt)+) => { $crate::__leveled!(info, $($tt)+) };
}

/// Logs a success at `Info` with the `OK` flag.
#[macro_export]
macro_rules! ok {
    ($($tt:tt)+) => { $crate::__leveled!(ok, $($tt)+) };
}

/// Logs at `Warning`.
#[macro_export]
macro_rules! warn {
    ($($tt:tt)+) => { $crate::__leveled!(warn, $($tt)+) };
}

/// Logs a failure at `Error`.
///
/// With a single argument the value is passed to [`Logger::err`](crate::Logger::err) as is,
/// so errors keep their source. Several arguments are joined into one message.
#[macro_export]
macro_rules! err {
    ($logger:expr, $failure:expr ; $call:expr) => {
        $logger.err($failure, $call.in_module(::std::module_path!()))
    };
    ($logger:expr, $failure:expr $(,)?) => {
        $logger.err(
            $failure,
            $crate::Call::new().in_module(::std::module_path!()),
        )
    };
    ($logger:expr, $($arg:expr),+ ; $call:expr) => {
        $logger.err(
            $crate::__join!($($arg),+),
            $call.in_module(::std::module_path!()),
        )
    };
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.err(
            $crate::__join!($($arg),+),
            $crate::Call::new().in_module(::std::module_path!()),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __join {
    ($($arg:expr),+) => {
        $crate::LogRecord::join_message(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::hidden::{reset_for_test, test_guard};
    use crate::{Call, Level, Logger, MemoryWriter, Rendering, WriterKind, set_log_level};
    use std::sync::Arc;

    fn spied() -> (Logger, Arc<MemoryWriter>) {
        let logger = Logger::new(Some("macro"));
        let file = Arc::new(MemoryWriter::new(Rendering::Plain));
        logger.set_writer(WriterKind::Console, None);
        logger.set_writer(WriterKind::Stream, None);
        logger.set_writer(WriterKind::File, Some(file.clone()));
        (logger, file)
    }

    #[test]
    fn macros_join_and_attribute_to_module() {
        let _guard = test_guard();
        reset_for_test();
        set_log_level(Level::Debug);
        let (logger, file) = spied();

        crate::debug!(logger, "a", 1, 2.5);
        crate::info!(logger, "b",);
        crate::warn!(logger, "c"; Call::new().flag("WARN"));
        crate::ok!(logger, "done");

        let lines = file.drain_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[DEBUG] ") && lines[0].ends_with("a 1 2.5"));
        assert!(lines[0].contains("multilog::macros::tests:"));
        assert!(lines[2].starts_with("[WARN] "));
        assert!(lines[3].starts_with("[OK] "));
        reset_for_test();
    }

    #[test]
    fn err_accepts_errors_and_values() {
        let _guard = test_guard();
        reset_for_test();
        let (logger, file) = spied();

        crate::err!(logger, std::io::Error::other("broken pipe"));
        crate::err!(logger, "retries exhausted after", 3, "attempts");
        crate::err!(logger, "quiet"; Call::new().skip(WriterKind::File));

        let lines = file.drain_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("broken pipe"));
        assert!(lines[1].ends_with("retries exhausted after 3 attempts"));
    }
}
