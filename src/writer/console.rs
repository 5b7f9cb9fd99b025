// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::WriteFailure;
use crate::writer::{Rendering, Writer};
use std::io::Write;
use std::sync::{Arc, OnceLock};

/**
A writer that logs to stdout.

Failures are dropped: a closed or broken stdout must never take the host program down.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConsoleWriter {}

impl ConsoleWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Writer for ConsoleWriter {
    fn write(&self, line: &str) -> Result<(), WriteFailure> {
        let mut lock = std::io::stdout().lock();
        let _ = writeln!(lock, "{line}");
        Ok(())
    }

    fn rendering(&self) -> Rendering {
        Rendering::Styled
    }

    fn prepare_to_die(&self) {
        let _ = std::io::stdout().lock().flush();
    }
}

static CONSOLE: OnceLock<Arc<ConsoleWriter>> = OnceLock::new();

/// The console writer every logger starts with.
pub fn console_writer() -> Arc<ConsoleWriter> {
    CONSOLE.get_or_init(|| Arc::new(ConsoleWriter::new())).clone()
}
