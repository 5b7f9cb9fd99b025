// SPDX-License-Identifier: MIT OR Apache-2.0

//! Destinations a logger can write to.
//!
//! A [`Writer`] receives lines that are already rendered; it says which rendering it wants
//! through [`Writer::rendering`] and the logger produces it. Each logger has at most one
//! writer per [`WriterKind`].

use crate::error::WriteFailure;
use std::fmt::Debug;

mod console;
mod file;
mod memory;
mod stream;

pub use console::{ConsoleWriter, console_writer};
pub use file::{FileWriter, JsonFileWriter};
pub use memory::MemoryWriter;
pub use stream::{STREAM_QUEUE_CAPACITY, StreamSink, StreamWriter, TcpSink, stream_writer};

/// The slot a writer occupies on a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterKind {
    Console,
    File,
    Stream,
}

impl WriterKind {
    pub const ALL: [WriterKind; 3] = [WriterKind::Console, WriterKind::File, WriterKind::Stream];
}

/// Which rendering of a record a writer receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rendering {
    /// Colorized, for terminals.
    Styled,
    /// Same fields as [`Rendering::Styled`] without escapes.
    Plain,
    /// A JSON object per record.
    Structured,
}

pub trait Writer: Debug + Send + Sync {
    /**
    Writes one rendered line. The writer adds the line terminator if its medium needs one.
    */
    fn write(&self, line: &str) -> Result<(), WriteFailure>;

    fn rendering(&self) -> Rendering;

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self) {}
}

/// The set of writer kinds a single call is kept away from.
///
/// Empty by default, meaning every bound writer receives the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Destinations {
    console: bool,
    file: bool,
    stream: bool,
}

impl Destinations {
    pub const fn none() -> Self {
        Self {
            console: false,
            file: false,
            stream: false,
        }
    }

    /// Every kind except `kind`.
    pub fn all_but(kind: WriterKind) -> Self {
        let mut skip = Self {
            console: true,
            file: true,
            stream: true,
        };
        skip.remove(kind);
        skip
    }

    pub fn insert(&mut self, kind: WriterKind) {
        *self.slot(kind) = true;
    }

    pub fn remove(&mut self, kind: WriterKind) {
        *self.slot(kind) = false;
    }

    pub fn contains(&self, kind: WriterKind) -> bool {
        match kind {
            WriterKind::Console => self.console,
            WriterKind::File => self.file,
            WriterKind::Stream => self.stream,
        }
    }

    fn slot(&mut self, kind: WriterKind) -> &mut bool {
        match kind {
            WriterKind::Console => &mut self.console,
            WriterKind::File => &mut self.file,
            WriterKind::Stream => &mut self.stream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_toggle_independently() {
        let mut skip = Destinations::none();
        assert!(WriterKind::ALL.iter().all(|kind| !skip.contains(*kind)));

        skip.insert(WriterKind::File);
        assert!(skip.contains(WriterKind::File));
        assert!(!skip.contains(WriterKind::Console));

        let only_console = Destinations::all_but(WriterKind::Console);
        assert!(!only_console.contains(WriterKind::Console));
        assert!(only_console.contains(WriterKind::File));
        assert!(only_console.contains(WriterKind::Stream));
    }
}
