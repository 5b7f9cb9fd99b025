// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Writer
//!
//! A writer that keeps every line it receives in memory instead of sending it anywhere.
//! Useful for:
//!
//! - Unit testing code that logs through `multilog`
//! - Standing in for the console or stream slot to see exactly what a destination received
//! - Collecting lines for display by the host application

use crate::error::WriteFailure;
use crate::writer::{Rendering, Writer};
use std::sync::Mutex;

/// Captures lines in a `Vec<String>`.
///
/// The rendering is chosen at construction, so a memory writer placed in the console slot
/// with [`Rendering::Styled`] sees exactly what stdout would have.
///
/// # Example
///
/// ```rust
/// use multilog::{Call, Logger, MemoryWriter, Rendering, WriterKind};
/// use std::sync::Arc;
///
/// # let _guard = multilog::hidden::test_guard();
/// # multilog::hidden::reset_for_test();
/// let spy = Arc::new(MemoryWriter::new(Rendering::Plain));
/// let logger = Logger::new(Some("spy-example"));
/// logger.set_writer(WriterKind::Console, Some(spy.clone()));
/// logger.set_writer(WriterKind::Stream, None);
///
/// logger.info(&[&"Test message", &42], Call::new());
///
/// let logs = spy.drain_logs();
/// assert!(logs.contains("Test message 42"));
/// ```
#[derive(Debug)]
pub struct MemoryWriter {
    rendering: Rendering,
    lines: Mutex<Vec<String>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: derived, required by Writer
// - Default: plain rendering, empty buffer
// - Clone: NOT implemented - two spies sharing nothing would be confusing
// - PartialEq/Eq/Hash: NOT implemented - comparing mutex state is meaningless
// - Send/Sync: automatic through Mutex

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new(Rendering::Plain)
    }
}

impl MemoryWriter {
    pub fn new(rendering: Rendering) -> Self {
        Self {
            rendering,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// A copy of every line received so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Takes every line received so far, leaving the buffer empty.
    pub fn drain_lines(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    /// Drains all lines into a single newline-joined string.
    pub fn drain_logs(&self) -> String {
        self.drain_lines().join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Writer for MemoryWriter {
    fn write(&self, line: &str) -> Result<(), WriteFailure> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
        Ok(())
    }

    fn rendering(&self) -> Rendering {
        self.rendering
    }
}
