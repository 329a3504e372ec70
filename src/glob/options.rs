//! Options controlling glob compilation and matching.
//!
//! This mirrors the role of the teacher's glob-options builder but exposes
//! the full toggle surface the pattern compiler and match engine need,
//! rather than a single `case_sensitive` switch.

/// Toggles recognized by the glob compiler and match engine.
///
/// Construct via [`GlobMatcherOptions::builder`]; the plain struct
/// constructor is private so that adding a new toggle does not break
/// downstream code that builds one field at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobMatcherOptions {
    pub allow_windows_paths: bool,
    pub allow_windows_paths_in_patterns: bool,
    pub dot: bool,
    pub flip_negate: bool,
    pub ignore_case: bool,
    pub match_base: bool,
    pub no_brace: bool,
    pub no_comment: bool,
    pub no_globstar: bool,
    pub no_negate: bool,
}

impl Default for GlobMatcherOptions {
    fn default() -> Self {
        GlobMatcherOptions {
            allow_windows_paths: false,
            allow_windows_paths_in_patterns: false,
            dot: false,
            flip_negate: false,
            ignore_case: false,
            match_base: false,
            no_brace: false,
            no_comment: false,
            no_globstar: false,
            no_negate: false,
        }
    }
}

impl GlobMatcherOptions {
    /// Starts a new [`GlobMatcherOptionsBuilder`] with every toggle at its
    /// default (off) value.
    pub fn builder() -> GlobMatcherOptionsBuilder {
        GlobMatcherOptionsBuilder(GlobMatcherOptions::default())
    }

    /// `true` if `c` is treated as a path separator under these options.
    pub(crate) fn is_separator(&self, c: char) -> bool {
        c == '/' || (self.allow_windows_paths && c == '\\')
    }
}

/// Builder for [`GlobMatcherOptions`], following the teacher's
/// mutable-`&mut self`-returning builder style.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcherOptionsBuilder(GlobMatcherOptions);

impl GlobMatcherOptionsBuilder {
    pub fn allow_windows_paths(&mut self, yes: bool) -> &mut Self {
        self.0.allow_windows_paths = yes;
        self
    }

    pub fn allow_windows_paths_in_patterns(&mut self, yes: bool) -> &mut Self {
        self.0.allow_windows_paths_in_patterns = yes;
        self
    }

    pub fn dot(&mut self, yes: bool) -> &mut Self {
        self.0.dot = yes;
        self
    }

    pub fn flip_negate(&mut self, yes: bool) -> &mut Self {
        self.0.flip_negate = yes;
        self
    }

    pub fn ignore_case(&mut self, yes: bool) -> &mut Self {
        self.0.ignore_case = yes;
        self
    }

    pub fn match_base(&mut self, yes: bool) -> &mut Self {
        self.0.match_base = yes;
        self
    }

    pub fn no_brace(&mut self, yes: bool) -> &mut Self {
        self.0.no_brace = yes;
        self
    }

    pub fn no_comment(&mut self, yes: bool) -> &mut Self {
        self.0.no_comment = yes;
        self
    }

    pub fn no_globstar(&mut self, yes: bool) -> &mut Self {
        self.0.no_globstar = yes;
        self
    }

    pub fn no_negate(&mut self, yes: bool) -> &mut Self {
        self.0.no_negate = yes;
        self
    }

    pub fn build(&self) -> GlobMatcherOptions {
        self.0
    }
}
