//! Config resolver: walks from a target file up to the filesystem root,
//! collects `.editorconfig` files, matches their sections against the
//! target, and folds the results into a normalized [`PropertyMap`].
//!
//! Grounded on `rotmh-editorconfig-core-rust`'s `properties_with_options`
//! (ancestors walk, reversed-order fold) and `helix-core`'s
//! `EditorConfig::find`, including its `log::info!`/`log::warn!` diagnostics
//! around file discovery and section application.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::glob::Glob;
use crate::ini::ConfigFile;
use crate::properties::{self, PropertyMap};

/// Version gate for the `indent_style = tab` -> `indent_size = tab`
/// inference, mirroring the reference `editorconfig-core`'s own feature
/// version for this behavior.
const FEATURE_INDENT_SIZE_TAB_INFERENCE: &str = "0.9.0";

/// Inputs shared by the library resolver and the CLI.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Name of the config file to look for while walking up. Defaults to
    /// `.editorconfig`.
    pub config_file_name: String,
    /// When set, only this file is consulted; the directory walk is
    /// skipped entirely.
    pub override_path: Option<PathBuf>,
    /// Gates version-dependent behaviors (currently just the
    /// `indent_size = tab` inference).
    pub develop_version: Option<String>,
    /// When set, overrides every discovered file's own `root` marker with
    /// this value: `Some(true)` stops the walk after the first file found;
    /// `Some(false)` disables root-stopping entirely.
    pub root_override: Option<bool>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions {
            config_file_name: ".editorconfig".to_string(),
            override_path: None,
            develop_version: None,
            root_override: None,
        }
    }
}

/// Resolves the property map that applies to `target`.
pub fn resolve(target: impl AsRef<Path>, options: &ResolverOptions) -> Result<PropertyMap, Error> {
    let target = target.as_ref();
    let target_abs = std::fs::canonicalize(target)
        .map_err(|source| Error::io(target.to_path_buf(), source))?;
    let dir = target_abs
        .parent()
        .ok_or_else(|| Error::InvalidTarget {
            path: target_abs.clone(),
        })?;

    let files = collect_files(dir, options)?;
    let target_str = to_forward_slash(&target_abs);

    let mut raw: Vec<(String, String)> = Vec::new();
    for file in files.iter().rev() {
        for section in &file.sections {
            let pattern = anchor_pattern(&section.name, &file.dir);
            let glob = Glob::new(&pattern)?;
            let matched = glob.compile_matcher().is_match(&target_str);
            log::trace!(
                "section [{}] ({:?}) vs {} -> {}",
                section.name,
                file.path,
                target_str,
                matched
            );
            if matched {
                for (key, value) in section.properties() {
                    raw.push((key.to_string(), value.to_string()));
                }
            }
        }
    }

    let infer = version_allows(&options.develop_version, FEATURE_INDENT_SIZE_TAB_INFERENCE);
    let map = properties::normalize(&raw, infer);
    log::debug!(
        "resolved {} properties for {:?}",
        map.iter().count(),
        target_abs
    );
    Ok(map)
}

fn collect_files(dir: &Path, options: &ResolverOptions) -> Result<Vec<ConfigFile>, Error> {
    if let Some(path) = &options.override_path {
        log::debug!("using override config file {:?}", path);
        return Ok(vec![ConfigFile::parse(path)?]);
    }

    let mut files = Vec::new();
    for ancestor in dir.ancestors() {
        let candidate = ancestor.join(&options.config_file_name);
        if !candidate.is_file() {
            continue;
        }
        let file = ConfigFile::parse(&candidate)?;
        let is_root = options.root_override.unwrap_or(file.is_root);
        log::debug!(
            "discovered config file {:?} (root={})",
            candidate,
            is_root
        );
        files.push(file);
        if is_root {
            break;
        }
    }
    Ok(files)
}

/// Anchors a section name to the directory of the file that declared it,
/// per the EditorConfig rule: a name containing `/` anchors directly under
/// the file's directory, otherwise an implicit `**/` lets it match at any
/// depth below it.
fn anchor_pattern(name: &str, dir: &Path) -> String {
    let dir_str = to_forward_slash(dir);
    if name.contains('/') {
        format!("{}/{}", dir_str, name.trim_start_matches('/'))
    } else {
        format!("{dir_str}/**/{name}")
    }
}

fn to_forward_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn version_allows(develop_version: &Option<String>, min_version: &str) -> bool {
    match develop_version {
        None => true,
        Some(v) => compare_versions(v, min_version) != Ordering::Less,
    }
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let pa: Vec<u32> = a.split('.').filter_map(|s| s.parse().ok()).collect();
    let pb: Vec<u32> = b.split('.').filter_map(|s| s.parse().ok()).collect();
    pa.cmp(&pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(label: &str) -> TempDir {
            let nonce = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            let path = std::env::temp_dir().join(format!("ecglob-test-{label}-{nonce}"));
            fs::create_dir_all(&path).unwrap();
            TempDir(path)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn anchors_slashed_pattern_to_file_directory() {
        assert_eq!(
            anchor_pattern("/foo/*.cs", Path::new("/proj")),
            "/proj/foo/*.cs"
        );
        assert_eq!(
            anchor_pattern("foo/*.cs", Path::new("/proj")),
            "/proj/foo/*.cs"
        );
    }

    #[test]
    fn anchors_plain_pattern_with_implicit_globstar() {
        assert_eq!(anchor_pattern("*.cs", Path::new("/proj")), "/proj/**/*.cs");
    }

    #[test]
    fn version_gate_suppresses_older_callers() {
        assert!(!version_allows(&Some("0.8.0".to_string()), "0.9.0"));
        assert!(version_allows(&Some("0.9.0".to_string()), "0.9.0"));
        assert!(version_allows(&Some("1.0.0".to_string()), "0.9.0"));
        assert!(version_allows(&None, "0.9.0"));
    }

    #[test]
    fn root_file_stops_the_walk() {
        let tmp = TempDir::new("root-stop");
        let proj = tmp.path().join("proj");
        let src = proj.join("src");
        fs::create_dir_all(&src).unwrap();

        fs::write(
            tmp.path().join(".editorconfig"),
            "root = true\n[*.cs]\nindent_style = tab\n",
        )
        .unwrap();
        fs::write(
            proj.join(".editorconfig"),
            "root = true\n[*.cs]\nindent_style = space\n",
        )
        .unwrap();
        let target = src.join("A.cs");
        fs::write(&target, "").unwrap();

        let map = resolve(&target, &ResolverOptions::default()).unwrap();
        assert_eq!(map.get("indent_style"), Some("space"));
    }

    #[test]
    fn inner_section_overrides_outer() {
        let tmp = TempDir::new("inner-wins");
        let proj = tmp.path().join("proj");
        let src = proj.join("src");
        fs::create_dir_all(&src).unwrap();

        fs::write(
            proj.join(".editorconfig"),
            "root = true\n[*.cs]\nindent_size = 2\n",
        )
        .unwrap();
        fs::write(src.join(".editorconfig"), "[*.cs]\nindent_size = 4\n").unwrap();
        let target = src.join("A.cs");
        fs::write(&target, "").unwrap();

        let map = resolve(&target, &ResolverOptions::default()).unwrap();
        assert_eq!(map.get("indent_size"), Some("4"));
    }

    #[test]
    fn indent_size_tab_inference_end_to_end() {
        let tmp = TempDir::new("tab-inference");
        fs::write(
            tmp.path().join(".editorconfig"),
            "root = true\n[*.cs]\nindent_style = tab\n",
        )
        .unwrap();
        let target = tmp.path().join("A.cs");
        fs::write(&target, "").unwrap();

        let map = resolve(&target, &ResolverOptions::default()).unwrap();
        assert_eq!(map.get("indent_size"), Some("tab"));
    }

    #[test]
    fn section_anchored_to_subdirectory_does_not_leak_to_sibling() {
        let tmp = TempDir::new("anchored-section");
        let docs = tmp.path().join("docs");
        let deep = docs.join("deep");
        fs::create_dir_all(&deep).unwrap();

        fs::write(
            tmp.path().join(".editorconfig"),
            "root = true\n[**/*.md]\nindent_style = space\n[docs/*.md]\ncharset = utf-8\n",
        )
        .unwrap();

        let deep_target = deep.join("x.md");
        fs::write(&deep_target, "").unwrap();
        let shallow_target = docs.join("x.md");
        fs::write(&shallow_target, "").unwrap();

        let deep_map = resolve(&deep_target, &ResolverOptions::default()).unwrap();
        assert_eq!(deep_map.get("indent_style"), Some("space"));
        assert_eq!(deep_map.get("charset"), None);

        let shallow_map = resolve(&shallow_target, &ResolverOptions::default()).unwrap();
        assert_eq!(shallow_map.get("charset"), Some("utf-8"));
    }

    #[test]
    fn bogus_value_survives_in_raw_map() {
        let tmp = TempDir::new("bogus");
        fs::write(
            tmp.path().join(".editorconfig"),
            "root = true\n[*.cs]\nindent_size = banana\n",
        )
        .unwrap();
        let target = tmp.path().join("A.cs");
        fs::write(&target, "").unwrap();

        let map = resolve(&target, &ResolverOptions::default()).unwrap();
        assert_eq!(map.get("indent_size"), Some("banana"));
        assert_eq!(map.indent_size(), None);
        assert_eq!(map.bogus().len(), 1);
    }

    #[test]
    fn no_matching_sections_yields_empty_map() {
        let tmp = TempDir::new("no-match");
        fs::write(
            tmp.path().join(".editorconfig"),
            "[*.py]\nindent_style = space\n",
        )
        .unwrap();
        let target = tmp.path().join("A.cs");
        fs::write(&target, "").unwrap();

        let map = resolve(&target, &ResolverOptions::default()).unwrap();
        assert!(map.is_empty());
    }
}
