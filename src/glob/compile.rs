//! Pattern compiler: turns one brace-expanded pattern string into an ordered
//! sequence of [`Element`]s plus the derived fast-forward metadata the match
//! engine consults.

use std::collections::BTreeMap;

use super::options::GlobMatcherOptions;

/// One element of a compiled pattern.
///
/// Five shapes, kept as a flat tagged enum rather than a class hierarchy —
/// see the design note on pattern element modeling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Element {
    Literal(String),
    OneChar { class: Option<Vec<char>>, negate: bool },
    SimpleAsterisk,
    DoubleAsterisk,
    PathSeparator,
}

/// The anchor an asterisk fast-forwards to: the next fixed element after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Anchor {
    Literal(String),
    PathSeparator,
}

/// Derived, immutable-after-compilation metadata for one asterisk element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct AsteriskMeta {
    pub anchor: Option<Anchor>,
    pub fixed_budget: usize,
    pub next_asterisk: Option<usize>,
}

/// One compiled alternation case: the element sequence plus derived
/// per-asterisk metadata and a cached "any separators at all" flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompiledCase {
    pub elements: Vec<Element>,
    pub asterisk_meta: BTreeMap<usize, AsteriskMeta>,
    pub has_path_separators: bool,
}

/// Compiles one brace-expanded pattern string into a [`CompiledCase`].
pub(crate) fn compile_case(pattern: &str, options: &GlobMatcherOptions) -> CompiledCase {
    let normalized;
    let source: &str = if options.allow_windows_paths_in_patterns {
        normalized = pattern.replace('\\', "/");
        &normalized
    } else {
        pattern
    };

    let elements = scan(source, options);
    let asterisk_meta = build_asterisk_meta(&elements);
    let has_path_separators = elements
        .iter()
        .any(|e| matches!(e, Element::PathSeparator | Element::DoubleAsterisk));

    CompiledCase {
        elements,
        asterisk_meta,
        has_path_separators,
    }
}

struct ClassState {
    start: usize,
    chars: Vec<char>,
    negate: bool,
    negate_consumed: bool,
    range: bool,
}

fn scan(source: &str, options: &GlobMatcherOptions) -> Vec<Element> {
    let allow_escape = !options.allow_windows_paths_in_patterns;
    let chars: Vec<char> = source.chars().collect();
    let mut elements: Vec<Element> = Vec::new();
    let mut literal = String::new();
    let mut escaping = false;
    let mut class: Option<ClassState> = None;

    let mut i = 0usize;
    'outer: loop {
        while i < chars.len() {
            let c = chars[i];

            if escaping {
                escaping = false;
                if c != '/' {
                    literal.push(c);
                    i += 1;
                    continue;
                }
                // escaped '/' falls through to ordinary separator handling
            } else if c == '\\' && allow_escape {
                escaping = true;
                i += 1;
                continue;
            }

            if let Some(cls) = class.as_mut() {
                match c {
                    '/' => {
                        // Open class never closed before a separator: rewind.
                        literal.push('[');
                        i = cls.start + 1;
                        class = None;
                        continue;
                    }
                    '!' | '^' if cls.chars.is_empty() && !cls.negate_consumed => {
                        cls.negate = true;
                        cls.negate_consumed = true;
                    }
                    ']' if cls.chars.is_empty() => {
                        // First position of the class body: literal ']'.
                        cls.chars.push(']');
                    }
                    ']' => {
                        let cls = class.take().unwrap();
                        elements.push(Element::OneChar {
                            class: Some(cls.chars),
                            negate: cls.negate,
                        });
                    }
                    '-' => push_class_dash(cls, &chars, i),
                    other => push_class_char(cls, other),
                }
            } else {
                match c {
                    '/' => {
                        flush_literal(&mut literal, &mut elements);
                        if !matches!(elements.last(), Some(Element::PathSeparator)) {
                            elements.push(Element::PathSeparator);
                        }
                    }
                    '?' => {
                        flush_literal(&mut literal, &mut elements);
                        elements.push(Element::OneChar {
                            class: None,
                            negate: false,
                        });
                    }
                    '*' => {
                        flush_literal(&mut literal, &mut elements);
                        match elements.last() {
                            Some(Element::SimpleAsterisk) if !options.no_globstar => {
                                elements.pop();
                                elements.push(Element::DoubleAsterisk);
                            }
                            Some(Element::SimpleAsterisk) | Some(Element::DoubleAsterisk) => {
                                // already an asterisk here, no-op
                            }
                            _ => elements.push(Element::SimpleAsterisk),
                        }
                    }
                    '[' => {
                        flush_literal(&mut literal, &mut elements);
                        class = Some(ClassState {
                            start: i,
                            chars: Vec::new(),
                            negate: false,
                            negate_consumed: false,
                            range: false,
                        });
                    }
                    _ => literal.push(c),
                }
            }
            i += 1;
        }

        if let Some(cls) = class.take() {
            literal.push('[');
            i = cls.start + 1;
            continue 'outer;
        }
        break;
    }

    if escaping {
        literal.push('\\');
    }
    flush_literal(&mut literal, &mut elements);
    elements
}

fn flush_literal(literal: &mut String, elements: &mut Vec<Element>) {
    if !literal.is_empty() {
        elements.push(Element::Literal(std::mem::take(literal)));
    }
}

fn push_class_char(cls: &mut ClassState, c: char) {
    if cls.range {
        if let Some(&start) = cls.chars.last() {
            let (lo, hi) = (start as u32 + 1, c as u32);
            if hi >= lo {
                for cp in lo..=hi {
                    if let Some(ch) = char::from_u32(cp) {
                        cls.chars.push(ch);
                    }
                }
            }
        }
        cls.range = false;
    } else {
        cls.chars.push(c);
    }
}

fn push_class_dash(cls: &mut ClassState, chars: &[char], i: usize) {
    if cls.range {
        // consecutive '-'s degrade to literals
        cls.chars.push('-');
        cls.range = false;
        return;
    }
    let at_start_edge = cls.chars.is_empty();
    let at_end_edge = chars.get(i + 1) == Some(&']');
    if at_start_edge || at_end_edge {
        cls.chars.push('-');
    } else {
        cls.range = true;
    }
}

fn build_asterisk_meta(elements: &[Element]) -> BTreeMap<usize, AsteriskMeta> {
    let positions: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, Element::SimpleAsterisk | Element::DoubleAsterisk))
        .map(|(i, _)| i)
        .collect();

    let mut meta = BTreeMap::new();
    for (k, &i) in positions.iter().enumerate() {
        let next_asterisk = positions.get(k + 1).copied();
        let end = next_asterisk.unwrap_or(elements.len());

        let mut anchor = None;
        let mut fixed_budget = 0usize;
        let just_after_double_star = matches!(elements[i], Element::DoubleAsterisk);
        let mut skip_next_separator = just_after_double_star;

        for element in &elements[i + 1..end] {
            match element {
                Element::Literal(s) => {
                    if anchor.is_none() {
                        anchor = Some(Anchor::Literal(s.clone()));
                    }
                    fixed_budget += s.chars().count();
                    skip_next_separator = false;
                }
                Element::OneChar { .. } => {
                    fixed_budget += 1;
                    skip_next_separator = false;
                }
                Element::PathSeparator => {
                    if anchor.is_none() {
                        anchor = Some(Anchor::PathSeparator);
                    }
                    if !skip_next_separator {
                        fixed_budget += 1;
                    }
                    skip_next_separator = false;
                }
                Element::SimpleAsterisk | Element::DoubleAsterisk => unreachable!(
                    "asterisk positions list should not include interior asterisks between i and end"
                ),
            }
        }

        meta.insert(
            i,
            AsteriskMeta {
                anchor,
                fixed_budget,
                next_asterisk,
            },
        );
    }
    meta
}
