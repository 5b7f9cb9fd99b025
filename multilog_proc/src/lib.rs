//SPDX-License-Identifier: MIT OR Apache-2.0

//! # multilog procedural macros
//!
//! Provides the `#[mention]` attribute re-exported by `multilog`. The attribute rewrites a
//! function so that, each time it is entered, a `currently running: <path>` line is logged
//! before the original body runs.
//!
//! ```rust
//! // #[multilog::mention]
//! // fn compute() -> u32 { 42 }
//!
//! // Expands to approximately:
//! // fn compute() -> u32 {
//! //     multilog::hidden::mention_pre(&multilog::default_logger(),
//! //         concat!(module_path!(), "::", "compute"), file!(), line!(), column!());
//! //     { 42 }
//! // }
//! ```

use proc_macro::TokenStream;

mod mention;

/// Logs `currently running: <module>::<fn>` every time the annotated function is entered.
///
/// With no arguments the line goes through `multilog::default_logger()`. An expression
/// evaluating to a `Logger` (or anything that derefs to one) may be passed instead:
///
/// ```ignore
/// #[multilog::mention(multilog::get_logger(Some("jobs")))]
/// fn run_job() { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn mention(attr: TokenStream, item: TokenStream) -> TokenStream {
    mention::mention_impl(attr, item)
}
