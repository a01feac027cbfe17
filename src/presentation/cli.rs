//! CLI Argument Parsing
//!
//! Running `distfix` with no arguments performs the default Vite flow:
//! `npx vite build`, then flatten `dist/public` into `dist`.
//! Every flag only overrides a hard-coded default.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    parse_env_pair, parse_nested_name, BuildCommand, FinalizeConfig, MergeMode,
};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// distfix - flatten a bundler's nested output for static hosting
#[derive(Parser, Debug)]
#[command(name = "distfix")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Pass a custom build command after `--`, e.g. `distfix -- pnpm vite build`.")]
pub struct Cli {
    /// Output root served by the static host
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Nested directory name under the root produced by the bundler
    #[arg(long, value_name = "NAME", value_parser = parse_nested_name)]
    pub nested: Option<PathBuf>,

    /// File that must exist at the root after relocation
    #[arg(long, value_name = "NAME")]
    pub marker: Option<String>,

    /// Build timeout in seconds [default: 180, env: DISTFIX_BUILD_TIMEOUT]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Stage the merge in a temporary directory before renaming into place
    #[arg(long)]
    pub staged: bool,

    /// Accept output written directly to the root when the nested dir is missing
    #[arg(long)]
    pub allow_flat: bool,

    /// Remove server bundles (index.js, *server*, node_modules) from the root
    #[arg(long)]
    pub strip_server_files: bool,

    /// Extra environment entry for the build (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Build command replacing `npx vite build`
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Layer flags over `base` (defaults with env overrides already applied)
    pub fn apply_to(&self, mut config: FinalizeConfig) -> FinalizeConfig {
        if let Some(root) = &self.root {
            config.output_root = root.clone();
        }
        if let Some(nested) = &self.nested {
            config.nested_dir = nested.clone();
        }
        if let Some(marker) = &self.marker {
            config.marker = marker.clone();
        }
        if let Some(secs) = self.timeout {
            config.build_timeout = std::time::Duration::from_secs(secs);
        }
        if self.staged {
            config.merge_mode = MergeMode::Staged;
        }
        if let Some(build) = BuildCommand::from_argv(&self.command) {
            config.build = build;
        }
        config.allow_flat_output |= self.allow_flat;
        config.strip_server_files |= self.strip_server_files;
        config.build_env.extend(self.env.iter().cloned());
        config
    }
}
