// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-call log record and its three renderings.
//!
//! A [`LogRecord`] is built once at the top of a logging call, rendered for each destination
//! that wants it, and dropped before the call returns. It is never queued or retained.
//!
//! | Rendering | Destination | Shape |
//! |---|---|---|
//! | [`Rendering::Styled`] | console | `[FLAG] datetime > identity > message`, colored |
//! | [`Rendering::Plain`] | file | same fields and order, no escapes |
//! | [`Rendering::Structured`] | stream, JSON file | one JSON object |

use crate::Level;
use crate::caller::CallerIdentity;
use crate::style::{Color, Style};
use crate::writer::Rendering;
use chrono::{DateTime, Local};
use std::fmt::{Display, Write};

/**
A log record.

Created by the logger for exactly one call. The message has already been assembled from the
call's arguments; everything else describes how the line should look.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    timestamp: DateTime<Local>,
    level: Option<Level>,
    logger: Option<String>,
    caller: Option<CallerIdentity>,
    flag: Option<String>,
    color: Option<Color>,
    message: String,
    datetime_format: Option<String>,
    with_datetime: bool,
    with_identifier: bool,
}

#[derive(serde::Serialize)]
struct StructuredRecord<'a> {
    logger: Option<&'a str>,
    level: Option<Level>,
    flag: Option<&'a str>,
    timestamp: String,
    caller: Option<String>,
    message: &'a str,
}

impl LogRecord {
    pub fn new(level: Option<Level>, message: String) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            logger: None,
            caller: None,
            flag: None,
            color: None,
            message,
            datetime_format: None,
            with_datetime: true,
            with_identifier: true,
        }
    }

    /// Joins the arguments of a call: each one stringified, separated by a single space.
    pub fn join_message(args: &[&dyn Display]) -> String {
        let mut message = String::new();
        for (idx, arg) in args.iter().enumerate() {
            if idx > 0 {
                message.push(' ');
            }
            message.push_str(&arg.to_string());
        }
        message
    }

    pub fn with_logger(mut self, logger: Option<&str>) -> Self {
        self.logger = logger.map(str::to_string);
        self
    }

    pub fn with_caller(mut self, caller: Option<CallerIdentity>) -> Self {
        self.caller = caller;
        self
    }

    /// Sets the leading label. With a color it is painted on the console; without one it
    /// is written as-is everywhere.
    pub fn with_flag(mut self, flag: impl Into<String>, color: Option<Color>) -> Self {
        self.flag = Some(flag.into());
        self.color = color;
        self
    }

    pub fn with_datetime_format(mut self, format: Option<String>) -> Self {
        self.datetime_format = format;
        self
    }

    pub fn show_datetime(mut self, show: bool) -> Self {
        self.with_datetime = show;
        self
    }

    pub fn show_identifier(mut self, show: bool) -> Self {
        self.with_identifier = show;
        self
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn caller(&self) -> Option<&CallerIdentity> {
        self.caller.as_ref()
    }

    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the record the way a destination asked for.
    pub fn render(&self, rendering: Rendering, style: &dyn Style) -> String {
        match rendering {
            Rendering::Styled => self.render_line(style, true),
            Rendering::Plain => self.render_line(style, false),
            Rendering::Structured => self.render_structured(),
        }
    }

    fn render_line(&self, style: &dyn Style, styled: bool) -> String {
        let layout = style.layout();
        let separator = if styled {
            &layout.console_separator
        } else {
            &layout.file_separator
        };
        let mut line = String::new();

        if let Some(flag) = &self.flag {
            match self.color {
                Some(color) if styled => {
                    line.push('[');
                    line.push_str(&style.render(flag, color));
                    line.push_str("] ");
                }
                Some(_) => {
                    line.push('[');
                    line.push_str(&style.render_plain(flag));
                    line.push_str("] ");
                }
                None => line.push_str(flag),
            }
        }

        if self.with_datetime && layout.with_datetime {
            let format = self
                .datetime_format
                .as_deref()
                .unwrap_or(&layout.datetime_format);
            // a bad user format must not panic the caller
            let _ = write!(line, "{}", self.timestamp.format(format));
            line.push_str(separator);
        }

        if self.with_identifier && layout.with_identifier {
            if let Some(caller) = &self.caller {
                let whom = caller.to_string();
                if styled {
                    line.push_str(&style.render(&whom, layout.identifier_color));
                } else {
                    line.push_str(&style.render_plain(&whom));
                }
                line.push_str(separator);
            }
        }

        line.push_str(&self.message);
        line
    }

    fn render_structured(&self) -> String {
        let structured = StructuredRecord {
            logger: self.logger.as_deref(),
            level: self.level,
            flag: self.flag.as_deref(),
            timestamp: self.timestamp.to_rfc3339(),
            caller: self.caller.as_ref().map(ToString::to_string),
            message: &self.message,
        };
        // every field is a string, number or null, so encoding cannot fail
        serde_json::to_string(&structured).unwrap_or_default()
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug/Clone/PartialEq: derived, handy when comparing what writers saw in tests
- Display: the bare message

NOT IMPLEMENTED:
- Default: a record without a timestamp or message has no meaning
- Eq/Hash/Ord: timestamps make equality incidental, ordering meaningless
- Serialize: the structured rendering has its own shape (see StructuredRecord)
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Layout, LogStyle};

    fn identity() -> CallerIdentity {
        CallerIdentity {
            module: "app::disk".to_string(),
            function: None,
            line: 12,
        }
    }

    #[test]
    fn join_uses_single_spaces() {
        let args: [&dyn Display; 3] = [&"disk", &42, &1.5];
        assert_eq!(LogRecord::join_message(&args), "disk 42 1.5");
        assert_eq!(LogRecord::join_message(&[]), "");
    }

    #[test]
    fn styled_and_plain_share_field_order() {
        let style = LogStyle::default();
        let record = LogRecord::new(Some(Level::Warning), "disk low".to_string())
            .with_flag("WARN", Some(Color::Yellow))
            .with_caller(Some(identity()));

        let styled = record.render(Rendering::Styled, &style);
        let plain = record.render(Rendering::Plain, &style);

        assert!(styled.contains("WARN"));
        assert!(styled.contains('\u{1b}'));
        assert!(!plain.contains('\u{1b}'));
        assert!(plain.starts_with("[WARN] "));
        assert!(plain.ends_with(" > app::disk:12 > disk low"));
    }

    #[test]
    fn switches_drop_fields_with_their_separator() {
        let style = LogStyle::new(Layout {
            with_datetime: false,
            ..Layout::default()
        });
        let record = LogRecord::new(Some(Level::Info), "hello".to_string())
            .with_flag("INFO", Some(Color::White))
            .with_caller(None);
        assert_eq!(record.render(Rendering::Plain, &style), "[INFO] hello");

        let bare = LogRecord::new(None, "raw".to_string())
            .show_datetime(false)
            .show_identifier(false);
        assert_eq!(bare.render(Rendering::Plain, &LogStyle::default()), "raw");
    }

    #[test]
    fn structured_is_json() {
        let record = LogRecord::new(Some(Level::Error), "boom".to_string())
            .with_logger(Some("jobs"))
            .with_flag("ERROR", Some(Color::Red))
            .with_caller(Some(identity()));
        let json: serde_json::Value =
            serde_json::from_str(&record.render(Rendering::Structured, &LogStyle::default()))
                .unwrap();
        assert_eq!(json["logger"], "jobs");
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["flag"], "ERROR");
        assert_eq!(json["caller"], "app::disk:12");
        assert_eq!(json["message"], "boom");
        assert!(json["timestamp"].is_string());
    }
}
