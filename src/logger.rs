// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger: builds one record per call and fans it out to the bound writers.
//!
//! # Flow of a leveled call
//!
//! 1. The method's level is checked against the process-wide threshold. A disabled call
//!    returns immediately; no record is built and no writer is touched.
//! 2. The call site is captured (`#[track_caller]`) and resolved into a caller identity.
//! 3. The arguments are joined into the message and a [`LogRecord`] is built.
//! 4. Every bound writer whose kind the call did not exclude receives the rendering it asked
//!    for: styled for the console, plain for files, structured for the stream.
//! 5. The logger itself is returned so calls can be chained.
//!
//! Write failures stop at the logger. Only configuration calls such as
//! [`Logger::set_log_dir`] return errors.
//!
//! # Example
//!
//! ```rust
//! use multilog::{Call, WriterKind, get_logger};
//! # let _guard = multilog::hidden::test_guard();
//! # multilog::hidden::reset_for_test();
//!
//! let logger = get_logger(Some("example"));
//! logger
//!     .info(&[&"started", &3, &"workers"], Call::new())
//!     .warn(&[&"disk low"], Call::new().flag("WARN").skip(WriterKind::File));
//! ```

use crate::caller::{CallSite, CallerResolver, SourceResolver};
use crate::error::{Failure, LogError, LoggedError};
use crate::level::{Level, is_enabled};
use crate::log_record::LogRecord;
use crate::registry::default_logger;
use crate::style::{Color, LogStyle, Style};
use crate::writer::{
    Destinations, FileWriter, JsonFileWriter, Rendering, Writer, WriterKind, console_writer,
    stream_writer,
};
use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Per-call options of the leveled methods.
///
/// Every leveled method takes one, so the destinations of a call are always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Call<'a> {
    flag: Option<&'a str>,
    skip: Destinations,
    module: Option<&'static str>,
}

impl<'a> Call<'a> {
    /// Default flag, every bound writer.
    pub const fn new() -> Self {
        Self {
            flag: None,
            skip: Destinations::none(),
            module: None,
        }
    }

    /// Replaces the method's default label (`"INFO"`, `"WARNING"`, ...).
    pub fn flag(mut self, flag: &'a str) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Keeps this call away from `kind`.
    pub fn skip(mut self, kind: WriterKind) -> Self {
        self.skip.insert(kind);
        self
    }

    /// Undoes a previous [`skip`](Self::skip) or [`only`](Self::only) for `kind`.
    pub fn include(mut self, kind: WriterKind) -> Self {
        self.skip.remove(kind);
        self
    }

    /// Sends this call to `kind` alone.
    pub fn only(mut self, kind: WriterKind) -> Self {
        self.skip = Destinations::all_but(kind);
        self
    }

    /// Attributes the call to a module; the logging macros pass `module_path!()`.
    pub fn in_module(mut self, module: &'static str) -> Self {
        self.module = Some(module);
        self
    }

    /// The writer kinds this call is kept away from.
    pub fn skipped(&self) -> Destinations {
        self.skip
    }
}

/// Options of the ungated [`Logger::log`] primitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions<'a> {
    prefix: Option<&'a str>,
    datetime_format: Option<&'a str>,
    with_identifier: Option<bool>,
    with_datetime: Option<bool>,
    skip: Destinations,
}

impl<'a> LogOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written verbatim before the rest of the line.
    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn datetime_format(mut self, format: &'a str) -> Self {
        self.datetime_format = Some(format);
        self
    }

    pub fn with_identifier(mut self, show: bool) -> Self {
        self.with_identifier = Some(show);
        self
    }

    pub fn with_datetime(mut self, show: bool) -> Self {
        self.with_datetime = Some(show);
        self
    }

    pub fn skip(mut self, kind: WriterKind) -> Self {
        self.skip.insert(kind);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct Writers {
    console: Option<Arc<dyn Writer>>,
    file: Option<Arc<dyn Writer>>,
    stream: Option<Arc<dyn Writer>>,
}

impl Writers {
    fn defaults() -> Self {
        Self {
            console: Some(console_writer()),
            file: None,
            stream: Some(stream_writer()),
        }
    }

    fn slot(&mut self, kind: WriterKind) -> &mut Option<Arc<dyn Writer>> {
        match kind {
            WriterKind::Console => &mut self.console,
            WriterKind::File => &mut self.file,
            WriterKind::Stream => &mut self.stream,
        }
    }

    fn get(&self, kind: WriterKind) -> Option<&Arc<dyn Writer>> {
        match kind {
            WriterKind::Console => self.console.as_ref(),
            WriterKind::File => self.file.as_ref(),
            WriterKind::Stream => self.stream.as_ref(),
        }
    }
}

/// A named logger.
///
/// Usually obtained from [`get_logger`](crate::get_logger), which guarantees one instance
/// per name. A fresh logger writes to the shared console and stream writers and has no file
/// until [`set_log_dir`](Self::set_log_dir) is called.
#[derive(Debug)]
pub struct Logger {
    name: Option<String>,
    style: Arc<dyn Style>,
    resolver: Arc<dyn CallerResolver>,
    writers: RwLock<Writers>,
}

impl Logger {
    pub fn new(name: Option<&str>) -> Self {
        Self::with_style(name, Arc::new(LogStyle::default()))
    }

    pub fn with_style(name: Option<&str>, style: Arc<dyn Style>) -> Self {
        Self {
            name: name.map(str::to_string),
            style,
            resolver: Arc::new(SourceResolver),
            writers: RwLock::new(Writers::defaults()),
        }
    }

    /// Replaces the caller identity resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn style(&self) -> &dyn Style {
        &*self.style
    }

    // ------------------------------------------------------------------
    // leveled methods
    // ------------------------------------------------------------------

    /// Logs at [`Level::Debug`] with the `DEBUG` flag.
    #[track_caller]
    pub fn debug(&self, args: &[&dyn Display], call: Call<'_>) -> &Self {
        self.leveled(Level::Debug, "DEBUG", Color::Cyan, args, call)
    }

    /// Logs at [`Level::Info`] with the `INFO` flag.
    #[track_caller]
    pub fn info(&self, args: &[&dyn Display], call: Call<'_>) -> &Self {
        self.leveled(Level::Info, "INFO", Color::White, args, call)
    }

    /// Logs a success at [`Level::Info`] with the `OK` flag.
    #[track_caller]
    pub fn ok(&self, args: &[&dyn Display], call: Call<'_>) -> &Self {
        self.leveled(Level::Info, "OK", Color::Green, args, call)
    }

    /// Logs at [`Level::Warning`] with the `WARNING` flag.
    #[track_caller]
    pub fn warn(&self, args: &[&dyn Display], call: Call<'_>) -> &Self {
        self.leveled(Level::Warning, "WARNING", Color::Yellow, args, call)
    }

    /// Logs a failure at [`Level::Error`] with the `ERROR` flag.
    ///
    /// `failure` may be a real error or any value; either way it is normalised into a
    /// [`LoggedError`] whose message is what gets logged.
    #[track_caller]
    pub fn err(&self, failure: impl Into<Failure>, call: Call<'_>) -> &Self {
        let logged = failure.into().into_logged();
        self.leveled(Level::Error, "ERROR", Color::Red, &[&logged], call)
    }

    /// [`err`](Self::err) with re-raising: logs first, then hands back the normalised error
    /// for the caller to propagate.
    ///
    /// ```rust
    /// # use multilog::{Call, LoggedError, get_logger};
    /// # let _guard = multilog::hidden::test_guard();
    /// fn load(path: &str) -> Result<String, LoggedError> {
    ///     std::fs::read_to_string(path)
    ///         .map_err(|e| get_logger(Some("loader")).reraise(e, Call::new()))
    /// }
    /// assert!(load("/definitely/not/here").is_err());
    /// ```
    #[track_caller]
    pub fn reraise(&self, failure: impl Into<Failure>, call: Call<'_>) -> LoggedError {
        let logged = failure.into().into_logged();
        self.leveled(Level::Error, "ERROR", Color::Red, &[&logged], call);
        logged
    }

    /// The ungated primitive: no level check, no default flag.
    #[track_caller]
    pub fn log(&self, args: &[&dyn Display], options: LogOptions<'_>) -> &Self {
        let site = CallSite::here();
        let mut record = self
            .record(None, LogRecord::join_message(args), &site)
            .with_datetime_format(options.datetime_format.map(str::to_string))
            .show_datetime(options.with_datetime.unwrap_or(true))
            .show_identifier(options.with_identifier.unwrap_or(true));
        if let Some(prefix) = options.prefix {
            record = record.with_flag(prefix, None);
        }
        self.dispatch(&record, options.skip);
        self
    }

    /// Logs `line_cnt` empty lines.
    pub fn skip_lines(&self, line_cnt: usize) -> &Self {
        for _ in 0..line_cnt {
            self.log(
                &[],
                LogOptions::new()
                    .with_datetime(false)
                    .with_identifier(false)
                    .skip(WriterKind::Stream),
            );
        }
        self
    }

    /// Logs the contents of a text file, without datetime or identity.
    #[track_caller]
    pub fn log_txt_file(&self, path: impl AsRef<Path>) -> Result<&Self, LogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.log(
            &[&contents.trim_end_matches('\n')],
            LogOptions::new().with_datetime(false).with_identifier(false),
        ))
    }

    #[track_caller]
    fn leveled(
        &self,
        level: Level,
        default_flag: &str,
        color: Color,
        args: &[&dyn Display],
        call: Call<'_>,
    ) -> &Self {
        if !is_enabled(level) {
            return self;
        }
        let site = CallSite::here().with_module(call.module);
        self.emit(level, call.flag.unwrap_or(default_flag), color, args, &site, call.skip);
        self
    }

    fn emit(
        &self,
        level: Level,
        flag: &str,
        color: Color,
        args: &[&dyn Display],
        site: &CallSite,
        skip: Destinations,
    ) {
        let record = self
            .record(Some(level), LogRecord::join_message(args), site)
            .with_flag(flag, Some(color));
        self.dispatch(&record, skip);
    }

    fn record(&self, level: Option<Level>, message: String, site: &CallSite) -> LogRecord {
        LogRecord::new(level, message)
            .with_logger(self.name.as_deref())
            .with_caller(self.resolver.resolve(site))
    }

    fn dispatch(&self, record: &LogRecord, skip: Destinations) {
        // clone the targets so no lock is held during I/O
        let targets: Vec<Arc<dyn Writer>> = {
            let writers = self
                .writers
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            WriterKind::ALL
                .iter()
                .filter(|kind| !skip.contains(**kind))
                .filter_map(|kind| writers.get(*kind).cloned())
                .collect()
        };
        let mut rendered: [Option<String>; 3] = [None, None, None];
        for writer in targets {
            let rendering = writer.rendering();
            let slot = &mut rendered[rendering_index(rendering)];
            let line = slot.get_or_insert_with(|| record.render(rendering, &*self.style));
            // write failures never reach the caller
            let _ = writer.write(line);
        }
    }

    // ------------------------------------------------------------------
    // writers
    // ------------------------------------------------------------------

    /// Puts `writer` in the `kind` slot, releasing whatever was there. `None` empties it.
    pub fn set_writer(&self, kind: WriterKind, writer: Option<Arc<dyn Writer>>) -> &Self {
        let previous = {
            let mut writers = self
                .writers
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(writers.slot(kind), writer)
        };
        drop(previous);
        self
    }

    pub fn writer(&self, kind: WriterKind) -> Option<Arc<dyn Writer>> {
        self.writers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(kind)
            .cloned()
    }

    pub fn is_file_bound(&self) -> bool {
        self.writer(WriterKind::File).is_some()
    }

    /// Binds the file slot to exactly `path`. `None` unbinds.
    ///
    /// The previous file writer is released before the new file is opened.
    pub fn bind_file(&self, path: Option<&Path>) -> Result<&Self, LogError> {
        self.set_writer(WriterKind::File, None);
        if let Some(path) = path {
            let writer = FileWriter::bind(path)?;
            self.set_writer(WriterKind::File, Some(Arc::new(writer)));
        }
        Ok(self)
    }

    /// Logs to a daily file inside `path`.
    ///
    /// The file is `<name><YYYY-MM-DD>.log` when `independent` is set, otherwise
    /// `<YYYY-MM-DD>.log`, shared with every logger pointed at the same directory. `None`
    /// or an empty path unbinds the current file.
    ///
    /// # Errors
    ///
    /// * [`LogError::NotADirectory`] if `path` is an existing regular file.
    /// * [`LogError::DirectoryCreate`] if `path` is missing and cannot be created.
    ///
    /// In both cases the current binding is left as it was.
    ///
    /// * [`LogError::FileBind`] if the daily file cannot be opened. The previous file has
    ///   already been released at that point, so the logger is left without a file.
    pub fn set_log_dir(&self, path: Option<&Path>, independent: bool) -> Result<&Self, LogError> {
        self.set_dir(path, independent, false)
    }

    /// Like [`set_log_dir`](Self::set_log_dir), writing one JSON object per line to
    /// `<YYYY-MM-DD>.jsonl`.
    pub fn set_json_log_dir(
        &self,
        path: Option<&Path>,
        independent: bool,
    ) -> Result<&Self, LogError> {
        self.set_dir(path, independent, true)
    }

    fn set_dir(&self, path: Option<&Path>, independent: bool, json: bool) -> Result<&Self, LogError> {
        let Some(path) = path.filter(|path| !path.as_os_str().is_empty()) else {
            self.set_writer(WriterKind::File, None);
            return Ok(self);
        };
        if path.is_file() {
            return Err(LogError::NotADirectory(path.to_path_buf()));
        }
        if !path.exists() {
            let announcer = default_logger();
            announcer.info(
                &[&format!("Directory {} not found, trying to create.", path.display())],
                Call::new(),
            );
            if let Err(source) = std::fs::create_dir_all(path) {
                announcer.err(
                    format!("Failed when trying to create directory {}", path.display()),
                    Call::new(),
                );
                return Err(LogError::DirectoryCreate {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let file = path.join(self.daily_file_name(independent, if json { "jsonl" } else { "log" }));
        self.set_writer(WriterKind::File, None);
        let writer: Arc<dyn Writer> = if json {
            Arc::new(JsonFileWriter::bind(&file)?)
        } else {
            Arc::new(FileWriter::bind(&file)?)
        };
        self.set_writer(WriterKind::File, Some(writer));
        Ok(self)
    }

    fn daily_file_name(&self, independent: bool, extension: &str) -> String {
        let date = chrono::Local::now().format("%Y-%m-%d");
        match (&self.name, independent) {
            (Some(name), true) => format!("{name}{date}.{extension}"),
            _ => format!("{date}.{extension}"),
        }
    }

    /// Flushes every bound writer.
    pub fn prepare_to_die(&self) {
        for kind in WriterKind::ALL {
            if let Some(writer) = self.writer(kind) {
                writer.prepare_to_die();
            }
        }
    }

    pub(crate) fn reset_writers(&self) {
        *self
            .writers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Writers::defaults();
    }

    // ------------------------------------------------------------------
    // decoration
    // ------------------------------------------------------------------

    /// Wraps a no-argument function so each call first logs `currently running: <name>`.
    ///
    /// `<name>` is the path of `f`: `app::jobs::cleanup` for a function item, the enclosing
    /// function for a closure. The return value is passed through untouched, so a returned
    /// `Err` (or a panic) reaches the caller after the line has been written.
    #[track_caller]
    pub fn mention<F, R>(self: &Arc<Self>, f: F) -> impl FnMut() -> R + use<F, R>
    where
        F: FnMut() -> R,
    {
        let mut f = f;
        let mut wrapped = self.wrap(function_name::<F>(), CallSite::here(), move |()| f());
        move || wrapped(())
    }

    /// [`mention`](Self::mention) for functions of one argument; use a tuple for more.
    #[track_caller]
    pub fn mention_with<F, A, R>(self: &Arc<Self>, f: F) -> impl FnMut(A) -> R + use<F, A, R>
    where
        F: FnMut(A) -> R,
    {
        self.wrap(function_name::<F>(), CallSite::here(), f)
    }

    fn wrap<G, A, R>(
        self: &Arc<Self>,
        name: &'static str,
        site: CallSite,
        f: G,
    ) -> impl FnMut(A) -> R + use<G, A, R>
    where
        G: FnMut(A) -> R,
    {
        let logger = Arc::clone(self);
        let mut f = f;
        move |args| {
            logger.announce(name, &site);
            f(args)
        }
    }

    pub(crate) fn announce(&self, name: &str, site: &CallSite) {
        if is_enabled(Level::Info) {
            self.emit(
                Level::Info,
                "INFO",
                Color::White,
                &[&format!("currently running: {name}")],
                site,
                Destinations::none(),
            );
        }
    }
}

/// `type_name` of `F`, with any trailing `::{{closure}}` segments removed.
fn function_name<F>() -> &'static str {
    let mut name = std::any::type_name::<F>();
    while let Some(enclosing) = name.strip_suffix("::{{closure}}") {
        name = enclosing;
    }
    name
}

fn rendering_index(rendering: Rendering) -> usize {
    match rendering {
        Rendering::Styled => 0,
        Rendering::Plain => 1,
        Rendering::Structured => 2,
    }
}

/*
Boilerplate notes.

# Logger

Clone makes no sense: identity matters, the registry hands out one Arc per name.
PartialEq/Eq/Hash would have to mean provenance; use Arc::ptr_eq instead.
Default is Logger::new(None), but the default logger lives in the registry, so no Default impl
to avoid a second "default" that isn't the default.
Display, From/Into, AsRef, Deref: no.
Send/Sync: automatic, every field is behind Arc or RwLock.
*/
