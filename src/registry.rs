// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide registry of named loggers.
//!
//! The registry maps a name to exactly one [`Logger`]. The first lookup of a name creates the
//! logger; every later lookup, from any thread, returns the same `Arc`. A distinguished
//! default logger, which has no name, lives outside the map.
//!
//! # Architecture
//!
//! The map sits behind a `Mutex` in a `OnceLock`. Lookup-or-insert happens entirely under the
//! lock, so two threads racing on a new name still create a single logger. The lock is held
//! only for the map operation, never while logging.
//!
//! # Examples
//!
//! ## Same name, same logger
//!
//! ```
//! use multilog::get_logger;
//! use std::sync::Arc;
//!
//! let a = get_logger(Some("db"));
//! let b = get_logger(Some("db"));
//! assert!(Arc::ptr_eq(&a, &b));
//! ```
//!
//! ## Keyed by type
//!
//! ```
//! use multilog::logger_for;
//! use std::sync::Arc;
//!
//! struct Scheduler;
//! let logger = logger_for::<Scheduler>();
//! assert!(logger.name().unwrap().ends_with("Scheduler"));
//! assert!(Arc::ptr_eq(&logger, &logger_for::<Scheduler>()));
//! ```

use crate::logger::Logger;
use crate::style::Style;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static LOGGERS: OnceLock<Mutex<HashMap<String, Arc<Logger>>>> = OnceLock::new();
static DEFAULT_LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

fn loggers() -> MutexGuard<'static, HashMap<String, Arc<Logger>>> {
    LOGGERS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The unnamed logger, returned whenever no name is given.
pub fn default_logger() -> Arc<Logger> {
    DEFAULT_LOGGER
        .get_or_init(|| Arc::new(Logger::new(None)))
        .clone()
}

/// Returns the logger registered under `name`, creating it on first use.
///
/// `None` returns the [`default_logger`].
pub fn get_logger(name: Option<&str>) -> Arc<Logger> {
    match name {
        None => default_logger(),
        Some(name) => loggers()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(Some(name))))
            .clone(),
    }
}

/// Like [`get_logger`], using `style` if the logger has to be created.
///
/// An existing logger keeps the style it was created with.
pub fn get_logger_with_style(name: Option<&str>, style: Arc<dyn Style>) -> Arc<Logger> {
    match name {
        None => default_logger(),
        Some(name) => loggers()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::with_style(Some(name), style)))
            .clone(),
    }
}

/// The logger owned by type `T`, keyed by its type name.
pub fn logger_for<T: ?Sized>() -> Arc<Logger> {
    get_logger(Some(std::any::type_name::<T>()))
}

/// Names currently registered, in no particular order.
pub fn registered_names() -> Vec<String> {
    loggers().keys().cloned().collect()
}

/// Forgets every named logger and restores the default logger's writers.
pub(crate) fn clear() {
    let removed: Vec<Arc<Logger>> = loggers().drain().map(|(_, logger)| logger).collect();
    // dropped outside the lock; file handles close here unless someone still holds the Arc
    drop(removed);
    default_logger().reset_writers();
}
