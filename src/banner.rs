// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
ASCII-art banners.

Rendering is left to a [`FigletEngine`]; this module only picks the font and makes sure it is
installed. A banner is decoration, so nothing here fails the caller: a font that cannot be
installed falls back to the engine's default, and a render failure becomes a warning.
*/

use crate::error::BannerError;
use crate::logger::{Call, LogOptions, Logger};
use crate::writer::WriterKind;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

/// Fonts bundled with the engine, one of which is picked when no font is requested.
pub const BUILTIN_FONTS: [&str; 5] = [
    "ansiregular",
    "ansishadow",
    "isometrixc2",
    "nscripts",
    "nvscript",
];

/// A figlet-style renderer.
pub trait FigletEngine {
    /// Names of the fonts that can be rendered right now.
    fn installed_fonts(&self) -> Vec<String>;

    /// Installs a `.flf` font file, making its file stem available as a font name.
    fn install_font(&self, path: &Path) -> Result<(), BannerError>;

    /// Where the bundled file for builtin font `font` lives.
    fn builtin_font_path(&self, font: &str) -> PathBuf;

    /// Renders `text`; `None` selects the engine's default font.
    fn render(&self, text: &str, font: Option<&str>) -> Result<String, BannerError>;
}

impl Logger {
    /// Prints `text` as a banner on the console.
    ///
    /// Without `font` a builtin font is chosen at random. A builtin font that is not
    /// installed yet is installed from the engine's bundle; anything else is treated as a
    /// path to a font file.
    pub fn banner(&self, engine: &dyn FigletEngine, text: &str, font: Option<&str>) -> &Self {
        let font = self.resolve_font(engine, font);
        match engine.render(text, font.as_deref()) {
            Ok(rendered) => {
                for line in rendered.lines() {
                    self.log(
                        &[&line],
                        LogOptions::new()
                            .with_datetime(false)
                            .with_identifier(false)
                            .skip(WriterKind::File)
                            .skip(WriterKind::Stream),
                    );
                }
            }
            Err(e) => {
                self.warn(&[&"could not render banner:", &e], Call::new());
            }
        }
        self
    }

    fn resolve_font(&self, engine: &dyn FigletEngine, font: Option<&str>) -> Option<String> {
        let font = match font {
            Some(font) => font.to_string(),
            None => BUILTIN_FONTS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(BUILTIN_FONTS[0])
                .to_string(),
        };
        let installed = engine.installed_fonts();
        if installed.contains(&font) {
            return Some(font);
        }

        if BUILTIN_FONTS.contains(&font.as_str()) {
            let path = engine.builtin_font_path(&font);
            return match engine.install_font(&path) {
                Ok(()) => Some(font),
                Err(e) => {
                    self.warn(
                        &[&"Could not install font", &font, &"- fallback to default:", &e],
                        Call::new(),
                    );
                    None
                }
            };
        }

        let path = Path::new(&font);
        if !path.is_file() {
            self.warn(
                &[&font, &"is neither an installed font nor a font file. Fallback to default."],
                Call::new(),
            );
            return None;
        }
        let stem = path.file_stem()?.to_string_lossy().into_owned();
        if installed.contains(&stem) {
            return Some(stem);
        }
        self.info(
            &[&stem, &"is not installed. Trying to install as a fontfile."],
            Call::new(),
        );
        match engine.install_font(path) {
            Ok(()) => Some(stem),
            Err(e) => {
                self.warn(
                    &[&"Could not install font", &font, &"- fallback to default:", &e],
                    Call::new(),
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hidden::{reset_for_test, test_guard};
    use crate::writer::{MemoryWriter, Rendering};
    use std::cell::RefCell;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeEngine {
        installed: RefCell<Vec<String>>,
        fail_install: bool,
        rendered_with: RefCell<Vec<Option<String>>>,
    }

    impl FigletEngine for FakeEngine {
        fn installed_fonts(&self) -> Vec<String> {
            self.installed.borrow().clone()
        }

        fn install_font(&self, path: &Path) -> Result<(), BannerError> {
            if self.fail_install {
                return Err(BannerError::Install {
                    path: path.to_path_buf(),
                    source: std::io::Error::other("read-only font dir"),
                });
            }
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            self.installed.borrow_mut().push(stem);
            Ok(())
        }

        fn builtin_font_path(&self, font: &str) -> PathBuf {
            PathBuf::from(format!("flfs/{font}.flf"))
        }

        fn render(&self, text: &str, font: Option<&str>) -> Result<String, BannerError> {
            self.rendered_with.borrow_mut().push(font.map(str::to_string));
            Ok(format!("## {text} ##\n## {text} ##"))
        }
    }

    fn spied() -> (Logger, Arc<MemoryWriter>, Arc<MemoryWriter>) {
        let logger = Logger::new(Some("banner"));
        let console = Arc::new(MemoryWriter::new(Rendering::Plain));
        let file = Arc::new(MemoryWriter::new(Rendering::Plain));
        logger.set_writer(WriterKind::Console, Some(console.clone()));
        logger.set_writer(WriterKind::File, Some(file.clone()));
        logger.set_writer(WriterKind::Stream, None);
        (logger, console, file)
    }

    #[test]
    fn random_builtin_font_is_installed_and_used() {
        let _guard = test_guard();
        reset_for_test();
        let (logger, console, file) = spied();
        let engine = FakeEngine::default();

        logger.banner(&engine, "hi", None);

        let used = engine.rendered_with.borrow()[0].clone().unwrap();
        assert!(BUILTIN_FONTS.contains(&used.as_str()));
        assert_eq!(engine.installed_fonts(), vec![used]);
        assert_eq!(console.drain_lines(), vec!["## hi ##", "## hi ##"]);
        assert!(file.is_empty(), "banners stay on the console");
    }

    #[test]
    fn failed_install_falls_back_to_default() {
        let _guard = test_guard();
        reset_for_test();
        let (logger, console, _file) = spied();
        let engine = FakeEngine {
            fail_install: true,
            ..FakeEngine::default()
        };

        logger.banner(&engine, "hi", Some("nvscript"));

        assert_eq!(engine.rendered_with.borrow()[0], None);
        let lines = console.drain_lines();
        assert!(lines[0].contains("Could not install font nvscript"));
        assert_eq!(&lines[1..], ["## hi ##", "## hi ##"]);
    }

    #[test]
    fn font_files_are_installed_by_stem() {
        let _guard = test_guard();
        reset_for_test();
        let (logger, _console, _file) = spied();
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("blocky.flf");
        std::fs::write(&font, "flf2a$ 1 1 1 0 0\n").unwrap();
        let engine = FakeEngine::default();

        logger.banner(&engine, "hi", font.to_str());
        assert_eq!(
            engine.rendered_with.borrow()[0].as_deref(),
            Some("blocky")
        );

        logger.banner(&engine, "hi", Some("no/such/font.flf"));
        assert_eq!(engine.rendered_with.borrow()[1], None);
    }
}
