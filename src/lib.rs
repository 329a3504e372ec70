//! A from-scratch EditorConfig glob matcher and directory-resolution engine.
//!
//! Given a target file path, [`resolver::resolve`] walks the directory
//! hierarchy collecting `.editorconfig` files, matches their sections
//! against the target with the engine in [`glob`], and folds the result
//! into a normalized [`properties::PropertyMap`].
//!
//! ```
//! use std::io::Write;
//!
//! let dir = std::env::temp_dir().join(format!("ecglob-doctest-{}", std::process::id()));
//! std::fs::create_dir_all(&dir).unwrap();
//! let mut file = std::fs::File::create(dir.join(".editorconfig")).unwrap();
//! writeln!(file, "root = true\n[*.rs]\nindent_style = space\nindent_size = 4").unwrap();
//! let target = dir.join("main.rs");
//! std::fs::write(&target, "").unwrap();
//!
//! let options = ecglob::resolver::ResolverOptions::default();
//! let map = ecglob::resolver::resolve(&target, &options).unwrap();
//! assert_eq!(map.get("indent_style"), Some("space"));
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

pub mod error;
pub mod glob;
pub mod ini;
pub mod properties;
pub mod resolver;

pub use crate::error::Error;
