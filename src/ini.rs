//! Hand-rolled INI parser for `.editorconfig` files.
//!
//! No regex crate: each line kind is recognized by a small character-class
//! scan over the trimmed line, tried in a fixed order, the way
//! `oxc-project-editorconfig-parser`'s `EditorConfig::parse` and
//! `rotmh-editorconfig-core-rust`'s `parse_dir`/`parse_section`/
//! `parse_pair` read INI text directly off `str` without a parser crate.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// One parsed line, carrying its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniLine {
    SectionHeader { name: String, line: usize },
    Property { key: String, value: String, line: usize },
    Comment { text: String, line: usize },
}

/// A named group of lines: either a `[pattern]` section, or the pseudo
/// section "Global" holding whatever precedes the first header.
#[derive(Debug, Clone, Default)]
pub struct IniSection {
    pub name: String,
    pub lines: Vec<IniLine>,
}

impl IniSection {
    /// The key/value pairs in this section, in declaration order. Later
    /// duplicate keys are not deduplicated here — that happens at the
    /// property-map composition stage, where last-writer-wins applies.
    pub fn properties(&self) -> Vec<(&str, &str)> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                IniLine::Property { key, value, .. } => Some((key.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    fn get_last(&self, key: &str) -> Option<&str> {
        self.properties()
            .into_iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

/// A parsed `.editorconfig` file: its path, directory, the `Global`
/// pseudo-section, and its named sections in declaration order.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub dir: PathBuf,
    pub global: IniSection,
    pub sections: Vec<IniSection>,
    pub is_root: bool,
}

impl ConfigFile {
    /// Reads and parses the file at `path`.
    pub fn parse(path: impl AsRef<Path>) -> Result<ConfigFile, Error> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| Error::io(path.to_path_buf(), source))?;
        Ok(Self::parse_str(path, &contents))
    }

    fn parse_str(path: &Path, contents: &str) -> ConfigFile {
        let dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut global = IniSection {
            name: "Global".to_string(),
            lines: Vec::new(),
        };
        let mut sections: Vec<IniSection> = Vec::new();
        let mut current: Option<usize> = None;

        for (idx, raw_line) in contents.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(text) = parse_comment(raw_line) {
                push_line(
                    &mut global,
                    &mut sections,
                    current,
                    IniLine::Comment {
                        text,
                        line: line_no,
                    },
                );
                continue;
            }

            if let Some((key, value)) = parse_property(raw_line) {
                push_line(
                    &mut global,
                    &mut sections,
                    current,
                    IniLine::Property {
                        key,
                        value,
                        line: line_no,
                    },
                );
                continue;
            }

            if let Some(name) = parse_section_header(raw_line) {
                sections.push(IniSection {
                    name,
                    lines: Vec::new(),
                });
                current = Some(sections.len() - 1);
                continue;
            }

            // Whitespace-only or unrecognized: silently skipped.
        }

        let is_root = global
            .get_last("root")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        ConfigFile {
            path: path.to_path_buf(),
            dir,
            global,
            sections,
            is_root,
        }
    }
}

fn push_line(
    global: &mut IniSection,
    sections: &mut [IniSection],
    current: Option<usize>,
    line: IniLine,
) {
    match current {
        Some(idx) => sections[idx].lines.push(line),
        None => global.lines.push(line),
    }
}

fn parse_comment(raw: &str) -> Option<String> {
    let trimmed = raw.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some('#') | Some(';') => Some(chars.as_str().to_string()),
        _ => None,
    }
}

fn parse_property(raw: &str) -> Option<(String, String)> {
    let trimmed = raw.trim_start();

    let mut key_end = 0usize;
    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
            key_end += c.len_utf8();
        } else {
            break;
        }
    }
    if key_end == 0 {
        return None;
    }
    let key = &trimmed[..key_end];

    let rest = trimmed[key_end..].trim_start();
    let mut rest_chars = rest.chars();
    match rest_chars.next() {
        Some('=') | Some(':') => {}
        _ => return None,
    }
    let after_sep = rest_chars.as_str().trim_start();

    let value_raw = match after_sep.find(['#', ';']) {
        Some(idx) => &after_sep[..idx],
        None => after_sep,
    };
    Some((key.to_string(), value_raw.trim_end().to_string()))
}

fn parse_section_header(raw: &str) -> Option<String> {
    let trimmed = raw.trim_start();
    let body = trimmed.strip_prefix('[')?;

    let mut name = String::new();
    let mut chars = body.char_indices().peekable();
    let mut close_idx = None;

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&(_, next @ ('#' | ';'))) => {
                    name.push(next);
                    chars.next();
                }
                _ => name.push('\\'),
            },
            ']' => {
                close_idx = Some(idx);
                break;
            }
            '#' | ';' => return None,
            other => name.push(other),
        }
    }

    let close_idx = close_idx?;
    if name.is_empty() {
        return None;
    }

    // Everything after the closing ']' must be whitespace, optionally
    // followed by a comment — anything else means this line doesn't match
    // the end-anchored section-header grammar at all.
    let remainder = body[close_idx + 1..].trim_start();
    if !remainder.is_empty() && !remainder.starts_with('#') && !remainder.starts_with(';') {
        return None;
    }

    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ConfigFile {
        ConfigFile::parse_str(Path::new("/proj/.editorconfig"), text)
    }

    #[test]
    fn global_root_marker() {
        let file = parse("root = true\n\n[*.cs]\nindent_style = space\n");
        assert!(file.is_root);
        assert_eq!(file.sections.len(), 1);
        assert_eq!(file.sections[0].name, "*.cs");
        assert_eq!(
            file.sections[0].get_last("indent_style"),
            Some("space")
        );
    }

    #[test]
    fn root_false_by_default() {
        let file = parse("[*.cs]\nindent_style = space\n");
        assert!(!file.is_root);
    }

    #[test]
    fn comment_lines_attach_to_current_section() {
        let file = parse("; leading comment\n[*.rs]\n# another comment\nkey=value\n");
        assert_eq!(file.global.lines.len(), 1);
        assert_eq!(file.sections[0].lines.len(), 2);
    }

    #[test]
    fn property_with_trailing_comment_is_trimmed() {
        let file = parse("[*.md]\nindent_size = 4 # four spaces\n");
        assert_eq!(file.sections[0].get_last("indent_size"), Some("4"));
    }

    #[test]
    fn colon_separator_is_accepted() {
        let file = parse("[*.go]\nindent_style: tab\n");
        assert_eq!(file.sections[0].get_last("indent_style"), Some("tab"));
    }

    #[test]
    fn unrecognized_line_is_skipped() {
        let file = parse("not a valid line at all\n[*.cs]\nindent_style = space\n");
        assert!(file.global.lines.is_empty());
        assert_eq!(file.sections.len(), 1);
    }

    #[test]
    fn section_name_with_escaped_hash() {
        let file = parse("[a\\#b]\nindent_style = space\n");
        assert_eq!(file.sections[0].name, "a#b");
    }

    #[test]
    fn unescaped_hash_in_header_is_not_a_section() {
        let file = parse("[a#b]\nindent_style = space\n");
        assert!(file.sections.is_empty());
    }

    #[test]
    fn trailing_garbage_after_close_bracket_is_not_a_section() {
        let file = parse("[*.cs]garbage\nindent_style = space\n");
        assert!(file.sections.is_empty());
        // the whole line is unrecognized, so it attaches nowhere
        assert!(file.global.lines.is_empty());
    }

    #[test]
    fn trailing_comment_after_close_bracket_is_still_a_section() {
        let file = parse("[*.cs] # a trailing note\nindent_style = space\n");
        assert_eq!(file.sections.len(), 1);
        assert_eq!(file.sections[0].name, "*.cs");
    }
}
