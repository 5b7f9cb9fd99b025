// SPDX-License-Identifier: MIT OR Apache-2.0

//! How flags and identifiers are painted, and how a line is laid out.
//!
//! The logger only talks to the [`Style`] trait. [`LogStyle`] is the stock implementation,
//! painting with ANSI escapes through `anstyle`.

use std::fmt::Debug;

/// Named colors a flag or identifier may be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn ansi(self) -> anstyle::AnsiColor {
        match self {
            Color::Red => anstyle::AnsiColor::Red,
            Color::Green => anstyle::AnsiColor::Green,
            Color::Yellow => anstyle::AnsiColor::Yellow,
            Color::Blue => anstyle::AnsiColor::Blue,
            Color::Magenta => anstyle::AnsiColor::Magenta,
            Color::Cyan => anstyle::AnsiColor::Cyan,
            Color::White => anstyle::AnsiColor::White,
        }
    }
}

/// Field layout shared by every rendering of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// `chrono` format string for the datetime field.
    pub datetime_format: String,
    /// Separator between fields in console lines.
    pub console_separator: String,
    /// Separator between fields in file lines.
    pub file_separator: String,
    pub with_datetime: bool,
    pub with_identifier: bool,
    /// Color of the caller identity in console lines.
    pub identifier_color: Color,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            console_separator: " > ".to_string(),
            file_separator: " > ".to_string(),
            with_datetime: true,
            with_identifier: true,
            identifier_color: Color::Blue,
        }
    }
}

/// Renders labels for the console and for plain-text destinations.
pub trait Style: Debug + Send + Sync {
    /// Colorized rendering of `text`.
    fn render(&self, text: &str, color: Color) -> String;

    /// Rendering of `text` without any markup.
    fn render_plain(&self, text: &str) -> String {
        text.to_string()
    }

    fn layout(&self) -> &Layout;
}

/// The stock [`Style`]: ANSI colors with a configurable [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogStyle {
    layout: Layout,
    no_color: bool,
}

impl LogStyle {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            no_color: false,
        }
    }

    /// A style whose console rendering carries no escapes either.
    pub fn plain() -> Self {
        Self {
            layout: Layout::default(),
            no_color: true,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

impl Style for LogStyle {
    fn render(&self, text: &str, color: Color) -> String {
        if self.no_color {
            return self.render_plain(text);
        }
        let style = anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(color.ansi())));
        format!("{}{}{}", style.render(), text, style.render_reset())
    }

    fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// Paints `text` with `color` using the default style.
pub fn colored_text(text: &str, color: Color) -> String {
    LogStyle::default().render(text, color)
}
