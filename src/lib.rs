//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# multilog

multilog is a leveled logger that writes each record to several destinations at once.

# The model

A process has any number of named loggers, handed out by [`get_logger`]. Each logger writes
to up to three destinations:

| Destination | Writer            | Rendering                         | Default                 |
|-------------|-------------------|-----------------------------------|-------------------------|
| console     | [`ConsoleWriter`] | colored line                      | bound, shared           |
| file        | [`FileWriter`]    | plain line, one file per day      | unbound until `set_log_dir` |
| stream      | [`StreamWriter`]  | one JSON object, fire-and-forget  | bound, disconnected     |

A single process-wide threshold ([`set_log_level`]) decides which calls produce a record at
all. A disabled call costs one atomic load.

| Method  | Level     | Flag      |
|---------|-----------|-----------|
| `debug` | `Debug`   | `DEBUG`   |
| `info`  | `Info`    | `INFO`    |
| `ok`    | `Info`    | `OK`      |
| `warn`  | `Warning` | `WARNING` |
| `err`   | `Error`   | `ERROR`   |

# The API

```rust
use multilog::{Call, WriterKind, get_logger};
# let _guard = multilog::hidden::test_guard();
# multilog::hidden::reset_for_test();

let logger = get_logger(Some("worker"));
logger.info(&[&"picked up job", &17], Call::new());

// the macros accept any number of Display arguments and record the module
multilog::warn!(logger, "disk low:", 93, "%"; Call::new().flag("WARN").skip(WriterKind::File));
```

Each record names the code that produced it, `module.function:line` or `module:line`, taken
from the call site through `#[track_caller]`.

# Files

```rust,no_run
# use multilog::get_logger;
# use std::path::Path;
let logger = get_logger(Some("worker"));
// writes to logs/worker2024-05-01.log; `false` shares logs/2024-05-01.log instead
logger.set_log_dir(Some(Path::new("logs")), true)?;
# Ok::<(), multilog::LogError>(())
```

Writers bound to the same path share one handle, so lines from different loggers never
interleave.

# Failures

Write failures never reach the caller. Configuration calls return [`LogError`].
[`Logger::reraise`] logs a failure and hands it back for propagation.
*/

mod banner;
mod caller;
mod error;
mod level;
mod log_record;
mod logger;
mod macros;
mod registry;
mod style;
pub mod writer;

pub use banner::{BUILTIN_FONTS, FigletEngine};
pub use caller::{CallSite, CallerIdentity, CallerResolver, NoResolver, SourceResolver};
pub use error::{BannerError, Failure, LogError, LoggedError, WriteFailure};
pub use level::{LEVEL_ENV, Level, init_from_env, is_enabled, log_level, set_log_level};
pub use log_record::LogRecord;
pub use logger::{Call, LogOptions, Logger};
pub use registry::{
    default_logger, get_logger, get_logger_with_style, logger_for, registered_names,
};
pub use style::{Color, Layout, LogStyle, Style, colored_text};
pub use writer::{
    ConsoleWriter, Destinations, FileWriter, JsonFileWriter, MemoryWriter, Rendering,
    STREAM_QUEUE_CAPACITY, StreamSink, StreamWriter, TcpSink, Writer, WriterKind,
    console_writer, stream_writer,
};

pub use multilog_proc::mention;

#[doc(hidden)]
pub mod hidden {
    use crate::caller::CallSite;
    use crate::level::{Level, set_log_level};
    use crate::logger::Logger;
    use std::sync::{Mutex, MutexGuard};

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    /// Entry hook of `#[multilog::mention]`.
    pub fn mention_pre(
        logger: &Logger,
        name: &'static str,
        file: &'static str,
        line: u32,
        column: u32,
    ) {
        let site = CallSite {
            file,
            line,
            column,
            module: None,
            function: None,
        };
        logger.announce(name, &site);
    }

    /// Serializes tests that touch process-wide state.
    pub fn test_guard() -> MutexGuard<'static, ()> {
        TEST_LOGGER_GUARD
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Restores the threshold, the registry and the shared stream writer.
    pub fn reset_for_test() {
        set_log_level(Level::Info);
        crate::registry::clear();
        crate::writer::stream_writer().disconnect();
    }
}

extern crate self as multilog;
