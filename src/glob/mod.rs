//! The from-scratch EditorConfig glob dialect: brace expansion, pattern
//! compilation, and a dot/globstar/case-aware match engine.
//!
//! ```
//! use ecglob::glob::Glob;
//!
//! let glob = Glob::new("*.cs").unwrap();
//! assert!(glob.compile_matcher().is_match("Foo.cs"));
//! assert!(!glob.compile_matcher().is_match("sub/Foo.cs"));
//! ```

mod brace;
mod compile;
mod matcher;
mod options;

pub use brace::expand_braces;
pub use matcher::{Glob, GlobBuilder, GlobMatcher};
pub use options::{GlobMatcherOptions, GlobMatcherOptionsBuilder};
