//! Match engine: decides whether an input string matches a compiled glob.
//!
//! Public shape (`Glob`, `GlobBuilder`, `GlobMatcher`) mirrors
//! `lintel-rs-lintel`'s `crates/glob-set/src/glob.rs`, which wraps a
//! hand-rolled match function behind the same kind of facade `globset`
//! exposes — the same `Builder`-constructs-immutable-`Glob` shape the
//! teacher used for its own `globset`-backed facade, with the backing
//! swapped for the hand-rolled engine in this module.

use super::brace::expand_braces;
use super::compile::{compile_case, Anchor, CompiledCase, Element};
use super::options::GlobMatcherOptions;
use crate::error::Error;

/// A compiled glob: the source pattern, its negate/empty/comment flags, and
/// one [`CompiledCase`] per brace-expanded alternative.
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    negate: bool,
    empty: bool,
    comment: bool,
    cases: Vec<CompiledCase>,
    options: GlobMatcherOptions,
}

impl Glob {
    /// Compiles `pattern` under the default options. Use [`GlobBuilder`] to
    /// customize.
    pub fn new(pattern: &str) -> Result<Glob, Error> {
        GlobBuilder::new(pattern).build()
    }

    /// The original, uncompiled pattern string.
    pub fn glob(&self) -> &str {
        &self.pattern
    }

    /// Builds the [`GlobMatcher`] used to test candidate strings.
    pub fn compile_matcher(&self) -> GlobMatcher<'_> {
        GlobMatcher { glob: self }
    }
}

/// Builds a [`Glob`] from a pattern string and a set of options.
///
/// Mirrors `globset::GlobBuilder`'s `case_insensitive`/`literal_separator`
/// naming for the common toggles, while [`GlobBuilder::options`] gives full
/// access to the richer [`GlobMatcherOptions`] surface this crate needs.
pub struct GlobBuilder<'a> {
    pattern: &'a str,
    options: GlobMatcherOptions,
}

impl<'a> GlobBuilder<'a> {
    pub fn new(pattern: &'a str) -> Self {
        GlobBuilder {
            pattern,
            options: GlobMatcherOptions::default(),
        }
    }

    /// Replaces the whole option set at once.
    pub fn options(&mut self, options: GlobMatcherOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn case_insensitive(&mut self, yes: bool) -> &mut Self {
        self.options.ignore_case = yes;
        self
    }

    pub fn literal_separator(&mut self, yes: bool) -> &mut Self {
        // Our match engine always treats path separators literally (`*`
        // never crosses a `/`); kept for API parity with `globset`.
        let _ = yes;
        self
    }

    pub fn build(&self) -> Result<Glob, Error> {
        Ok(compile_glob(self.pattern, self.options))
    }
}

fn compile_glob(pattern: &str, options: GlobMatcherOptions) -> Glob {
    let comment = !options.no_comment && pattern.starts_with('#');
    let empty = pattern.is_empty();

    let (negate, remainder) = if options.no_negate {
        (false, pattern)
    } else {
        let mut negate = false;
        let mut rest = pattern;
        while let Some(stripped) = rest.strip_prefix('!') {
            negate = !negate;
            rest = stripped;
        }
        (negate, rest)
    };

    let cases = if comment || empty {
        Vec::new()
    } else {
        expand_braces(remainder, &options)
            .iter()
            .map(|case| compile_case(case, &options))
            .collect()
    };

    Glob {
        pattern: pattern.to_string(),
        negate,
        empty,
        comment,
        cases,
        options,
    }
}

/// A compiled [`Glob`] ready to test candidates against.
///
/// Separate from `Glob` for API parity with `globset::GlobMatcher`; unlike
/// `globset` there is no extra compilation step here, so this is a thin
/// borrowing wrapper.
pub struct GlobMatcher<'a> {
    glob: &'a Glob,
}

impl GlobMatcher<'_> {
    pub fn is_match(&self, input: &str) -> bool {
        is_match(self.glob, input)
    }
}

fn is_match(glob: &Glob, input: &str) -> bool {
    if glob.comment {
        return false;
    }

    let hit = if glob.empty {
        input.is_empty()
    } else {
        glob.cases
            .iter()
            .any(|case| match_case_with_retries(case, input, &glob.options))
    };

    if hit {
        glob.options.flip_negate || !glob.negate
    } else {
        !glob.options.flip_negate && glob.negate
    }
}

/// Tries the case against `input`, then against `input` with trailing
/// separators stripped (trailing-slash forgiveness), then — if `match_base`
/// applies — against just the basename of `input`.
fn match_case_with_retries(case: &CompiledCase, input: &str, options: &GlobMatcherOptions) -> bool {
    let chars: Vec<char> = input.chars().collect();

    if match_case(case, &chars, options) {
        return true;
    }

    let trimmed = trim_trailing_separators(&chars, options);
    if trimmed.len() != chars.len() && match_case(case, trimmed, options) {
        return true;
    }

    if options.match_base && !case.has_path_separators {
        let base = basename(trimmed, options);
        if match_case(case, base, options) {
            return true;
        }
    }

    false
}

fn trim_trailing_separators<'a>(chars: &'a [char], options: &GlobMatcherOptions) -> &'a [char] {
    let mut end = chars.len();
    while end > 0 && options.is_separator(chars[end - 1]) {
        end -= 1;
    }
    &chars[..end]
}

fn basename<'a>(chars: &'a [char], options: &GlobMatcherOptions) -> &'a [char] {
    match chars.iter().rposition(|&c| options.is_separator(c)) {
        Some(pos) => &chars[pos + 1..],
        None => chars,
    }
}

fn match_case(case: &CompiledCase, input: &[char], options: &GlobMatcherOptions) -> bool {
    recursive_match(&case.elements, 0, &case.asterisk_meta, input, 0, options)
}

fn is_sep(c: char, options: &GlobMatcherOptions) -> bool {
    options.is_separator(c)
}

/// Dot policy: is it acceptable for the char at `input[pos]` to be consumed
/// by a wildcard, given it is `.`?
fn dot_ok(input: &[char], pos: usize, options: &GlobMatcherOptions) -> bool {
    if input[pos] != '.' {
        return true;
    }
    let at_segment_start = pos == 0 || is_sep(input[pos - 1], options);
    if !at_segment_start {
        return true;
    }
    if !options.dot {
        return false;
    }
    // `.` and `..` components are never matched by a wildcard, dot or not.
    let next_is_sep_or_end = pos + 1 == input.len() || is_sep(input[pos + 1], options);
    if next_is_sep_or_end {
        return false;
    }
    let next2_is_dot_component = input.get(pos + 1) == Some(&'.')
        && (pos + 2 == input.len() || is_sep(input[pos + 2], options));
    !next2_is_dot_component
}

/// Dot policy across an absorbed span `[ii, pos)`: every segment start
/// within the span (the span's own start, plus any position right after a
/// separator inside it) must pass [`dot_ok`].
fn span_dot_ok(input: &[char], ii: usize, pos: usize, options: &GlobMatcherOptions) -> bool {
    if ii >= pos {
        return true;
    }
    if !dot_ok(input, ii, options) {
        return false;
    }
    for k in (ii + 1)..pos {
        if is_sep(input[k - 1], options) && !dot_ok(input, k, options) {
            return false;
        }
    }
    true
}

fn class_matches(class: &Option<Vec<char>>, negate: bool, c: char, options: &GlobMatcherOptions) -> bool {
    match class {
        None => true,
        Some(set) => {
            let hit = if options.ignore_case {
                set.iter()
                    .any(|&candidate| candidate.eq_ignore_ascii_case(&c) || candidate == c)
            } else {
                set.contains(&c)
            };
            hit != negate
        }
    }
}

fn chars_eq(a: &[char], b: &[char], ignore_case: bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if ignore_case {
        a.iter()
            .zip(b.iter())
            .all(|(&x, &y)| x.eq_ignore_ascii_case(&y))
    } else {
        a == b
    }
}

fn recursive_match(
    elements: &[Element],
    ei: usize,
    meta: &std::collections::BTreeMap<usize, super::compile::AsteriskMeta>,
    input: &[char],
    ii: usize,
    options: &GlobMatcherOptions,
) -> bool {
    if ei == elements.len() {
        return ii == input.len();
    }

    match &elements[ei] {
        Element::Literal(lit) => {
            let lit_chars: Vec<char> = lit.chars().collect();
            let len = lit_chars.len();
            if ii + len > input.len() {
                return false;
            }
            if !chars_eq(&input[ii..ii + len], &lit_chars, options.ignore_case) {
                return false;
            }
            recursive_match(elements, ei + 1, meta, input, ii + len, options)
        }
        Element::PathSeparator => {
            if ii >= input.len() || !is_sep(input[ii], options) {
                return false;
            }
            let mut j = ii + 1;
            while j < input.len() && is_sep(input[j], options) {
                j += 1;
            }
            recursive_match(elements, ei + 1, meta, input, j, options)
        }
        Element::OneChar { class, negate } => {
            if ii >= input.len() {
                return false;
            }
            let c = input[ii];
            if is_sep(c, options) {
                return false;
            }
            if !dot_ok(input, ii, options) {
                return false;
            }
            if !class_matches(class, *negate, c, options) {
                return false;
            }
            recursive_match(elements, ei + 1, meta, input, ii + 1, options)
        }
        Element::SimpleAsterisk => match_asterisk(elements, ei, meta, input, ii, options, false),
        Element::DoubleAsterisk => match_asterisk(elements, ei, meta, input, ii, options, true),
    }
}

/// Matches a `*`/`**` at element index `ei` against `input` starting at
/// `ii`, using the precomputed anchor/budget to fast-forward candidate
/// split points instead of growing the absorbed span one character at a
/// time.
#[allow(clippy::too_many_arguments)]
fn match_asterisk(
    elements: &[Element],
    ei: usize,
    meta: &std::collections::BTreeMap<usize, super::compile::AsteriskMeta>,
    input: &[char],
    ii: usize,
    options: &GlobMatcherOptions,
    is_double: bool,
) -> bool {
    let asterisk_meta = meta.get(&ei);

    if is_double && matches!(elements.get(ei + 1), Some(Element::PathSeparator)) {
        // `**` adjacent to a separator absorbs zero segments by collapsing
        // the separator away entirely, so `a/**/b` matches `a/b`.
        if recursive_match(elements, ei + 2, meta, input, ii, options) {
            return true;
        }
    }

    if ei + 1 == elements.len() {
        // Terminal asterisk: absorbs everything remaining.
        if !is_double && input[ii..].iter().any(|&c| is_sep(c, options)) {
            return false;
        }
        if ii == input.len() {
            // Empty absorb at a segment boundary is rejected for a bare
            // `*` (so `a/b/` does not match `a/b/*`), but fine for `**`.
            if !is_double && ii != 0 && is_sep(input[ii - 1], options) {
                return false;
            }
            return true;
        }
        return dot_ok(input, ii, options);
    }

    let fixed_budget = asterisk_meta.map(|m| m.fixed_budget).unwrap_or(0);
    let anchor = asterisk_meta.and_then(|m| m.anchor.as_ref());

    let mut search_from = ii;
    loop {
        if search_from > input.len() {
            return false;
        }

        let candidate = match anchor {
            Some(Anchor::Literal(lit)) => find_literal(input, search_from, lit, options),
            Some(Anchor::PathSeparator) => find_separator(input, search_from, options),
            None => {
                // No fixed anchor after this asterisk (e.g. `?` or another
                // asterisk follows): fall back to growing the span by one.
                if search_from <= input.len() {
                    Some(search_from)
                } else {
                    None
                }
            }
        };

        let Some(pos) = candidate else {
            return false;
        };

        if !is_double && input[ii..pos].iter().any(|&c| is_sep(c, options)) {
            return false;
        }

        if input.len() - pos < fixed_budget {
            search_from = pos + 1;
            continue;
        }

        // Edge policy: an empty absorb for a `SimpleAsterisk` sitting between
        // two separators (or at a segment boundary on both sides) is
        // rejected, e.g. `a/b/*` must not match `a/b/`.
        let empty_absorb = pos == ii;
        if empty_absorb && !is_double {
            let before_is_sep_or_start = ii == 0 || is_sep(input[ii - 1], options);
            let after_is_sep_or_end = ii == input.len() || is_sep(input[ii], options);
            if before_is_sep_or_start && after_is_sep_or_end && ii != 0 {
                search_from = pos + 1;
                continue;
            }
        }

        if pos > ii && !span_dot_ok(input, ii, pos, options) {
            search_from = pos + 1;
            continue;
        }

        if recursive_match(elements, ei + 1, meta, input, pos, options) {
            return true;
        }

        if search_from >= input.len() {
            return false;
        }
        search_from = pos + 1;
    }
}

fn find_literal(input: &[char], from: usize, lit: &str, options: &GlobMatcherOptions) -> Option<usize> {
    let lit_chars: Vec<char> = lit.chars().collect();
    let len = lit_chars.len();
    if len == 0 {
        return Some(from);
    }
    if from + len > input.len() {
        return None;
    }
    for start in from..=(input.len() - len) {
        if chars_eq(&input[start..start + len], &lit_chars, options.ignore_case) {
            return Some(start);
        }
    }
    None
}

fn find_separator(input: &[char], from: usize, options: &GlobMatcherOptions) -> Option<usize> {
    (from..input.len()).find(|&i| is_sep(input[i], options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_match_with(pattern: &str, input: &str, options: GlobMatcherOptions) -> bool {
        GlobBuilder::new(pattern)
            .options(options)
            .build()
            .unwrap()
            .compile_matcher()
            .is_match(input)
    }

    fn is_match(pattern: &str, input: &str) -> bool {
        is_match_with(pattern, input, GlobMatcherOptions::default())
    }

    #[test]
    fn simple_extension() {
        assert!(is_match("*.cs", "Foo.cs"));
    }

    #[test]
    fn simple_asterisk_does_not_cross_separator() {
        assert!(!is_match("*.cs", "sub/Foo.cs"));
    }

    #[test]
    fn match_base_against_basename() {
        let mut options = GlobMatcherOptions::default();
        options.match_base = true;
        assert!(is_match_with("*.cs", "sub/Foo.cs", options));
    }

    #[test]
    fn globstar_absorbs_one_segment() {
        assert!(is_match("a/**/b", "a/x/b"));
    }

    #[test]
    fn globstar_absorbs_many_segments() {
        assert!(is_match("a/**/b", "a/x/y/b"));
    }

    #[test]
    fn globstar_absorbs_zero_segments() {
        assert!(is_match("a/**/b", "a/b"));
    }

    #[test]
    fn globstar_rejects_dotfile_by_default() {
        assert!(!is_match("a/**/b", "a/.d/b"));
    }

    #[test]
    fn globstar_allows_dotfile_with_dot_option() {
        let mut options = GlobMatcherOptions::default();
        options.dot = true;
        assert!(is_match_with("a/**/b", "a/.d/b", options));
    }

    #[test]
    fn simple_asterisk_rejects_dotfile_by_default() {
        assert!(!is_match("*", ".hidden"));
    }

    #[test]
    fn negated_class_excludes() {
        assert!(is_match("[!abc]", "d"));
        assert!(!is_match("[!abc]", "a"));
    }

    #[test]
    fn trailing_slash_is_forgiven() {
        assert!(is_match("a/*", "a/b/"));
    }

    #[test]
    fn trailing_slash_not_forgiven_for_trailing_star_edge() {
        assert!(!is_match("a/b/*", "a/b/"));
    }

    #[test]
    fn negation_idempotence() {
        let direct = is_match("a.cs", "a.cs");
        let doubly_negated = is_match("!!a.cs", "a.cs");
        assert_eq!(direct, doubly_negated);
    }

    #[test]
    fn trailing_slash_forgiveness_property_holds() {
        for (pattern, input) in [("*.cs", "Foo.cs"), ("a/**/b", "a/x/b"), ("a/*", "a/b")] {
            if is_match(pattern, input) {
                assert!(is_match(pattern, &format!("{input}/")));
            }
        }
    }

    #[test]
    fn comment_glob_never_matches() {
        assert!(!is_match("#*.cs", "#*.cs"));
    }

    #[test]
    fn empty_glob_matches_only_empty_input() {
        assert!(is_match("", ""));
        assert!(!is_match("", "x"));
    }
}
