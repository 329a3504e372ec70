//! Brace expansion: turns one pattern string with `{...}` groups into the
//! list of concrete alternative pattern strings the compiler sees.
//!
//! No pack crate implements this EditorConfig-flavoured brace grammar, so
//! this is a from-scratch hand scan, in the same "walk the chars yourself,
//! don't reach for a crate" posture the teacher used for its own path
//! manipulation helpers.

use super::options::GlobMatcherOptions;

/// Expands `pattern` into its brace alternatives.
///
/// Returns the singleton `[pattern]` when `options.no_brace` is set or the
/// pattern contains no `{` at all. An unterminated `{` is literalised by
/// prepending a backslash and re-expanding, per the brace grammar; the
/// escape is left in the returned string (e.g. `"a{bc"` comes back as
/// `"a\\{bc"`) and is only stripped once the pattern compiler's own escape
/// handling sees it, the same way any other backslash-escaped character
/// survives brace expansion unresolved.
pub fn expand_braces(pattern: &str, options: &GlobMatcherOptions) -> Vec<String> {
    if options.no_brace || !pattern.contains('{') {
        return vec![pattern.to_string()];
    }
    expand(pattern)
}

fn expand(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();

    let open = match find_unescaped_open(&chars) {
        Some(i) => i,
        None => return vec![pattern.to_string()],
    };

    let prefix: String = chars[..open].iter().collect();

    if let Some((start, end, close)) = parse_numeric_range(&chars, open) {
        let suffix: String = chars[close + 1..].iter().collect();
        let suffix_variants = expand(&suffix);

        let members: Vec<i64> = if start <= end {
            (start..=end).collect()
        } else {
            (end..=start).rev().collect()
        };

        let mut out = Vec::with_capacity(members.len() * suffix_variants.len());
        for member in members {
            for suffix_variant in &suffix_variants {
                out.push(format!("{prefix}{member}{suffix_variant}"));
            }
        }
        return out;
    }

    match find_matching_close(&chars, open) {
        Some((close, member_spans)) => {
            let suffix: String = chars[close + 1..].iter().collect();
            let suffix_variants = expand(&suffix);

            if member_spans.len() == 1 {
                // Single-member set: preserved verbatim, not flattened.
                let whole: String = chars[open..=close].iter().collect();
                return suffix_variants
                    .iter()
                    .map(|s| format!("{prefix}{whole}{s}"))
                    .collect();
            }

            let mut out = Vec::new();
            for (lo, hi) in member_spans {
                let member: String = chars[lo..hi].iter().collect();
                for member_variant in expand(&member) {
                    for suffix_variant in &suffix_variants {
                        out.push(format!("{prefix}{member_variant}{suffix_variant}"));
                    }
                }
            }
            out
        }
        None => {
            // Unterminated: literalise this `{` and retry the whole pattern.
            let mut escaped = String::with_capacity(pattern.len() + 1);
            escaped.extend(chars[..open].iter());
            escaped.push('\\');
            escaped.extend(chars[open..].iter());
            expand(&escaped)
        }
    }
}

/// Finds the index of the first `{` not preceded by an odd run of `\`.
fn find_unescaped_open(chars: &[char]) -> Option<usize> {
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == '{' {
            return Some(i);
        }
    }
    None
}

/// Tries to parse a numeric range `{start..end}` at `open` (which must point
/// at `{`). Returns `(start, end, close_index)` on success.
fn parse_numeric_range(chars: &[char], open: usize) -> Option<(i64, i64, usize)> {
    let mut j = open + 1;

    let start_begin = j;
    if chars.get(j) == Some(&'-') {
        j += 1;
    }
    let start_digits = j;
    while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        j += 1;
    }
    if j == start_digits {
        return None;
    }
    let start_str: String = chars[start_begin..j].iter().collect();

    if chars.get(j) != Some(&'.') || chars.get(j + 1) != Some(&'.') {
        return None;
    }
    j += 2;

    let end_begin = j;
    if chars.get(j) == Some(&'-') {
        j += 1;
    }
    let end_digits = j;
    while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        j += 1;
    }
    if j == end_digits {
        return None;
    }
    let end_str: String = chars[end_begin..j].iter().collect();

    if chars.get(j) != Some(&'}') {
        return None;
    }

    let start: i64 = start_str.parse().ok()?;
    let end: i64 = end_str.parse().ok()?;
    Some((start, end, j))
}

/// Scans a choice set starting at `open` (pointing at `{`), honoring nested
/// braces and backslash escapes. Returns the closing index plus the
/// half-open `[lo, hi)` spans (into `chars`) of each top-level member.
fn find_matching_close(chars: &[char], open: usize) -> Option<(usize, Vec<(usize, usize)>)> {
    let mut depth = 1usize;
    let mut escaped = false;
    let mut member_start = open + 1;
    let mut members = Vec::new();

    let mut i = open + 1;
    while i < chars.len() {
        let c = chars[i];
        if escaped {
            escaped = false;
            i += 1;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    members.push((member_start, i));
                    return Some((i, members));
                }
            }
            ',' if depth == 1 => {
                members.push((member_start, i));
                member_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GlobMatcherOptions {
        GlobMatcherOptions::default()
    }

    #[test]
    fn no_brace_passthrough() {
        assert_eq!(expand_braces("*.cs", &opts()), vec!["*.cs".to_string()]);
    }

    #[test]
    fn no_brace_option_suppresses_expansion() {
        let mut options = opts();
        options.no_brace = true;
        assert_eq!(
            expand_braces("a{b,c}", &options),
            vec!["a{b,c}".to_string()]
        );
    }

    #[test]
    fn choice_set() {
        let mut got = expand_braces("a{b,c,d}e", &opts());
        got.sort();
        assert_eq!(got, vec!["abe", "ace", "ade"]);
    }

    #[test]
    fn numeric_range_ascending() {
        assert_eq!(
            expand_braces("{0..3}", &opts()),
            vec!["0", "1", "2", "3"]
        );
    }

    #[test]
    fn numeric_range_descending() {
        assert_eq!(
            expand_braces("{3..0}", &opts()),
            vec!["3", "2", "1", "0"]
        );
    }

    #[test]
    fn single_member_set_preserved() {
        assert_eq!(expand_braces("a{b}c", &opts()), vec!["a{b}c".to_string()]);
    }

    #[test]
    fn unterminated_brace_is_literal() {
        // The stray `{` survives as a backslash-escaped literal; the escape
        // itself is only stripped later, by the pattern compiler.
        assert_eq!(expand_braces("a{bc", &opts()), vec!["a\\{bc".to_string()]);
    }

    #[test]
    fn nested_choice_sets() {
        let mut got = expand_braces("{a,b{1,2}}", &opts());
        got.sort();
        assert_eq!(got, vec!["a", "b1", "b2"]);
    }
}
