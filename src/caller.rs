// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attribution of a record to the code that produced it.
//!
//! Every public logging entry point is `#[track_caller]`, so the [`CallSite`] captured inside
//! the shared record builder is the user's own call, no matter how many internal layers the
//! call went through. A [`CallerResolver`] then turns the site into the identity shown in
//! the line.

use std::fmt::{Debug, Display};
use std::panic::Location;

/// Where a logging call came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// `module_path!()` of the call, when a macro supplied it.
    pub module: Option<&'static str>,
    /// Function name, when known (the `#[mention]` attribute supplies it).
    pub function: Option<&'static str>,
}

impl CallSite {
    #[track_caller]
    pub fn here() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            module: None,
            function: None,
        }
    }

    pub fn with_module(mut self, module: Option<&'static str>) -> Self {
        if module.is_some() {
            self.module = module;
        }
        self
    }
}

/// Module, function and line a record is attributed to.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CallerIdentity {
    pub module: String,
    pub function: Option<String>,
    pub line: u32,
}

impl Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{}.{}:{}", self.module, function, self.line),
            None => write!(f, "{}:{}", self.module, self.line),
        }
    }
}

/// Turns a captured call site into an identity. `None` means "don't attribute".
pub trait CallerResolver: Debug + Send + Sync {
    fn resolve(&self, site: &CallSite) -> Option<CallerIdentity>;
}

/// The stock resolver.
///
/// Uses the module path when one was captured, otherwise derives a module-like name from
/// the source file (`src/net/conn.rs` becomes `net::conn`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceResolver;

impl CallerResolver for SourceResolver {
    fn resolve(&self, site: &CallSite) -> Option<CallerIdentity> {
        let module = match site.module {
            Some(module) => module.to_string(),
            None => module_from_file(site.file)?,
        };
        Some(CallerIdentity {
            module,
            function: site.function.map(str::to_string),
            line: site.line,
        })
    }
}

/// Resolver that never attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl CallerResolver for NoResolver {
    fn resolve(&self, _site: &CallSite) -> Option<CallerIdentity> {
        None
    }
}

fn module_from_file(file: &str) -> Option<String> {
    let file = file.replace('\\', "/");
    let trimmed = file.strip_suffix(".rs").unwrap_or(&file);
    // keep whatever follows the last `src/` (or `tests/`) component
    let relative = ["/src/", "/tests/"]
        .iter()
        .filter_map(|marker| trimmed.rfind(marker).map(|idx| &trimmed[idx + marker.len()..]))
        .next()
        .or_else(|| trimmed.strip_prefix("src/"))
        .or_else(|| trimmed.strip_prefix("tests/"))
        .unwrap_or(trimmed);
    let relative = relative
        .strip_suffix("/mod")
        .unwrap_or(relative)
        .trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }
    Some(relative.replace('/', "::"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(file: &'static str) -> CallSite {
        CallSite {
            file,
            line: 7,
            column: 1,
            module: None,
            function: None,
        }
    }

    #[test]
    fn file_paths_become_module_names() {
        let resolver = SourceResolver;
        let id = resolver.resolve(&site("src/net/conn.rs")).unwrap();
        assert_eq!(id.module, "net::conn");
        assert_eq!(id.to_string(), "net::conn:7");

        let id = resolver.resolve(&site("/home/u/app/src/net/mod.rs")).unwrap();
        assert_eq!(id.module, "net");

        let id = resolver.resolve(&site("tests/logger.rs")).unwrap();
        assert_eq!(id.module, "logger");
    }

    #[test]
    fn module_path_wins_and_function_is_shown() {
        let mut call = site("src/lib.rs").with_module(Some("app::jobs"));
        call.function = Some("run");
        let id = SourceResolver.resolve(&call).unwrap();
        assert_eq!(id.to_string(), "app::jobs.run:7");
    }

    #[test]
    fn here_captures_this_line() {
        let call = CallSite::here();
        assert_eq!(call.line, line!() - 1);
        assert!(call.file.ends_with("caller.rs"));
        assert!(NoResolver.resolve(&call).is_none());
    }
}
