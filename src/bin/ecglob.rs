//! CLI front-end: parses arguments, resolves each target, prints the
//! resulting property map. `clap`-derive shape grounded on
//! `sk4ndal-commits-rgrep`'s `src/cli.rs`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ecglob::resolver::{self, ResolverOptions};

/// Resolves the EditorConfig properties that apply to one or more files.
#[derive(Debug, Parser)]
#[command(name = "ecglob", version, about, long_about = None)]
struct CliArgs {
    /// Use this file instead of discovering `.editorconfig` files.
    #[arg(short = 'f', value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// Set the develop_version, gating version-dependent behaviors.
    #[arg(short = 'b', value_name = "VERSION")]
    develop_version: Option<String>,

    /// File paths to resolve properties for.
    #[arg(required = true)]
    targets: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    let options = ResolverOptions {
        override_path: args.config_file.clone(),
        develop_version: args.develop_version.clone(),
        ..ResolverOptions::default()
    };

    let multiple = args.targets.len() > 1;
    let mut had_error = false;

    for target in &args.targets {
        match resolver::resolve(target, &options) {
            Ok(map) => {
                for entry in map.bogus() {
                    log::warn!(
                        "{}: bogus value for '{}': '{}' ({})",
                        target.display(),
                        entry.key,
                        entry.value,
                        entry.reason
                    );
                }
                for (key, value) in map.iter() {
                    if multiple {
                        println!("[{}] {key}={value}", target.display());
                    } else {
                        println!("{key}={value}");
                    }
                }
            }
            Err(err) => {
                eprintln!("ecglob: {}: {err}", target.display());
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
