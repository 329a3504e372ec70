//! Typed projections over the resolved property map.
//!
//! Grounded on `oxc-project-editorconfig-parser`'s `IndentStyle`/
//! `EndOfLine`/`Charset` enums (parsed with `eq_ignore_ascii_case`, no
//! `FromStr` machinery) and `rotmh-editorconfig-core-rust`'s
//! `process_properties` for the `indent_size`/`tab_width` inference order.

/// The recognized keys whose *values* are lower-cased during normalization,
/// in addition to every key always being lower-cased.
const KNOWN_KEYS: &[&str] = &[
    "root",
    "indent_style",
    "indent_size",
    "tab_width",
    "end_of_line",
    "charset",
    "trim_trailing_whitespace",
    "insert_final_newline",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Tab,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentSize {
    Size(u32),
    UseTabWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfLine {
    Lf,
    Cr,
    CrLf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Latin1,
    Utf8,
    Utf8Bom,
    Utf16Be,
    Utf16Le,
}

/// A recognized key whose value failed to parse. The key/value survive in
/// the raw map; the typed projection for that key is simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BogusEntry {
    pub key: String,
    pub value: String,
    pub reason: &'static str,
}

/// An ordered, lower-cased-key property map with typed projections over the
/// recognized EditorConfig keys.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
    bogus: Vec<BogusEntry>,
}

impl PropertyMap {
    pub fn new() -> Self {
        PropertyMap::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, lower-casing the key and overwriting any
    /// existing value in place (last writer wins, original position kept).
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref().to_ascii_lowercase();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Recognized keys whose value could not be parsed into a projection.
    pub fn bogus(&self) -> &[BogusEntry] {
        &self.bogus
    }

    fn mark_bogus(&mut self, key: &str, value: &str, reason: &'static str) {
        self.bogus.push(BogusEntry {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        });
    }

    pub fn indent_style(&self) -> Option<IndentStyle> {
        match self.get("indent_style") {
            Some("tab") => Some(IndentStyle::Tab),
            Some("space") => Some(IndentStyle::Space),
            _ => None,
        }
    }

    pub fn indent_size(&self) -> Option<IndentSize> {
        match self.get("indent_size") {
            Some("tab") => Some(IndentSize::UseTabWidth),
            Some(v) => v.parse::<u32>().ok().filter(|n| *n > 0).map(IndentSize::Size),
            None => None,
        }
    }

    pub fn tab_width(&self) -> Option<u32> {
        self.get("tab_width")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
    }

    pub fn end_of_line(&self) -> Option<EndOfLine> {
        match self.get("end_of_line") {
            Some("lf") => Some(EndOfLine::Lf),
            Some("cr") => Some(EndOfLine::Cr),
            Some("crlf") => Some(EndOfLine::CrLf),
            _ => None,
        }
    }

    pub fn charset(&self) -> Option<Charset> {
        match self.get("charset") {
            Some("latin1") => Some(Charset::Latin1),
            Some("utf-8") => Some(Charset::Utf8),
            Some("utf-8-bom") => Some(Charset::Utf8Bom),
            Some("utf-16be") => Some(Charset::Utf16Be),
            Some("utf-16le") => Some(Charset::Utf16Le),
            _ => None,
        }
    }

    pub fn trim_trailing_whitespace(&self) -> Option<bool> {
        self.get("trim_trailing_whitespace").and_then(parse_bool)
    }

    pub fn insert_final_newline(&self) -> Option<bool> {
        self.get("insert_final_newline").and_then(parse_bool)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    if v.eq_ignore_ascii_case("true") {
        Some(true)
    } else if v.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Normalizes a raw, accumulated `(key, value)` list into a [`PropertyMap`]:
/// lower-cases keys (and, for recognized keys, values), drops empty
/// keys/values, flags malformed recognized values as bogus, applies the
/// `indent_style = tab` → `indent_size = tab` inference when
/// `infer_indent_size` is set, and strips the `root` marker.
pub(crate) fn normalize(raw: &[(String, String)], infer_indent_size: bool) -> PropertyMap {
    let mut map = PropertyMap::new();

    for (key, value) in raw {
        if key.is_empty() || value.is_empty() {
            continue;
        }
        let lower_key = key.to_ascii_lowercase();
        let stored_value = if KNOWN_KEYS.contains(&lower_key.as_str()) {
            value.to_ascii_lowercase()
        } else {
            value.clone()
        };
        map.set(&lower_key, stored_value);
    }

    for key in KNOWN_KEYS.iter().filter(|k| **k != "root") {
        if let Some(value) = map.get(key).map(str::to_string) {
            validate_known(&mut map, key, &value);
        }
    }

    if infer_indent_size && map.get("indent_style") == Some("tab") && map.get("indent_size").is_none()
    {
        map.set("indent_size", "tab");
    }

    map.remove("root");
    map
}

fn validate_known(map: &mut PropertyMap, key: &str, value: &str) {
    let reason: Option<&'static str> = match key {
        "indent_style" => (value != "tab" && value != "space").then_some("expected 'tab' or 'space'"),
        "indent_size" => (value != "tab" && value.parse::<u32>().map(|n| n == 0).unwrap_or(true))
            .then_some("expected a positive integer or 'tab'"),
        "tab_width" => value
            .parse::<u32>()
            .map(|n| n == 0)
            .unwrap_or(true)
            .then_some("expected a positive integer"),
        "end_of_line" => (!matches!(value, "lf" | "cr" | "crlf")).then_some("expected 'lf', 'cr', or 'crlf'"),
        "charset" => (!matches!(value, "latin1" | "utf-8" | "utf-8-bom" | "utf-16be" | "utf-16le"))
            .then_some("expected a recognized charset"),
        "trim_trailing_whitespace" | "insert_final_newline" => {
            (value != "true" && value != "false").then_some("expected 'true' or 'false'")
        }
        _ => None,
    };
    if let Some(reason) = reason {
        map.mark_bogus(key, value, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_cases_keys_and_known_values() {
        let raw = vec![
            ("Indent_Style".to_string(), "TAB".to_string()),
            ("MyCustomKey".to_string(), "MixedCase".to_string()),
        ];
        let map = normalize(&raw, true);
        assert_eq!(map.get("indent_style"), Some("tab"));
        assert_eq!(map.get("mycustomkey"), Some("MixedCase"));
    }

    #[test]
    fn indent_size_inferred_from_tab_style() {
        let raw = vec![("indent_style".to_string(), "tab".to_string())];
        let map = normalize(&raw, true);
        assert_eq!(map.indent_size(), Some(IndentSize::UseTabWidth));
    }

    #[test]
    fn inference_suppressed_by_version_gate() {
        let raw = vec![("indent_style".to_string(), "tab".to_string())];
        let map = normalize(&raw, false);
        assert_eq!(map.indent_size(), None);
    }

    #[test]
    fn bogus_value_is_flagged_and_preserved() {
        let raw = vec![("indent_size".to_string(), "banana".to_string())];
        let map = normalize(&raw, true);
        assert_eq!(map.indent_size(), None);
        assert_eq!(map.get("indent_size"), Some("banana"));
        assert_eq!(map.bogus().len(), 1);
        assert_eq!(map.bogus()[0].key, "indent_size");
    }

    #[test]
    fn root_key_is_stripped() {
        let raw = vec![("root".to_string(), "true".to_string())];
        let map = normalize(&raw, true);
        assert!(map.is_empty());
    }

    #[test]
    fn empty_key_or_value_is_dropped() {
        let raw = vec![
            ("".to_string(), "x".to_string()),
            ("key".to_string(), "".to_string()),
        ];
        let map = normalize(&raw, true);
        assert!(map.is_empty());
    }
}
