//! Finalizer configuration
//!
//! Defaults are hard-coded; environment variables and CLI flags override
//! them (env first, flags last). No config file is read.

pub mod env_validator;

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

pub use env_validator::{levenshtein, EnvVarValidator};

use crate::domain::ports::CommandSpec;

pub const DEFAULT_OUTPUT_ROOT: &str = "dist";
pub const DEFAULT_NESTED_DIR: &str = "public";
pub const DEFAULT_MARKER: &str = "index.html";
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(180);

/// Environment entry that marks the child build as production
pub const PRODUCTION_ENV: (&str, &str) = ("NODE_ENV", "production");

pub const ENV_BUILD_TIMEOUT: &str = "DISTFIX_BUILD_TIMEOUT";
pub const ENV_MERGE: &str = "DISTFIX_MERGE";

/// How the nested directory is relocated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Remove-then-copy per entry, no rollback
    #[default]
    Direct,
    /// Copy everything into a staging dir first, then rename into place
    Staged,
}

impl MergeMode {
    pub const VALID_VALUES: &'static [&'static str] = &["direct", "staged"];

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Some(Self::Direct),
            "staged" => Some(Self::Staged),
            _ => None,
        }
    }
}

/// Program + argv of the bundler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["vite".to_string(), "build".to_string()],
        }
    }
}

impl BuildCommand {
    /// First element is the program, the rest are arguments
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeConfig {
    /// Directory served by the static host
    pub output_root: PathBuf,
    /// Name of the bundler's nested directory under `output_root`
    pub nested_dir: PathBuf,
    /// File whose presence at the root certifies a servable build
    pub marker: String,
    pub build: BuildCommand,
    pub build_timeout: Duration,
    /// Entries added to the child's environment on top of `NODE_ENV`
    pub build_env: Vec<(String, String)>,
    pub merge_mode: MergeMode,
    /// Accept output written straight to the root when the nested dir is absent
    pub allow_flat_output: bool,
    pub strip_server_files: bool,
}

impl Default for FinalizeConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            nested_dir: PathBuf::from(DEFAULT_NESTED_DIR),
            marker: DEFAULT_MARKER.to_string(),
            build: BuildCommand::default(),
            build_timeout: DEFAULT_BUILD_TIMEOUT,
            build_env: Vec::new(),
            merge_mode: MergeMode::Direct,
            allow_flat_output: false,
            strip_server_files: false,
        }
    }
}

impl FinalizeConfig {
    pub fn nested_path(&self) -> PathBuf {
        self.output_root.join(&self.nested_dir)
    }

    /// True when the nested dir is a single plain name directly under the root
    pub fn nested_is_child(&self) -> bool {
        is_plain_name(&self.nested_dir)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.output_root.join(&self.marker)
    }

    /// The child environment: production marker first, user entries after
    pub fn child_env(&self) -> Vec<(String, String)> {
        let mut env = vec![(PRODUCTION_ENV.0.to_string(), PRODUCTION_ENV.1.to_string())];
        env.extend(self.build_env.iter().cloned());
        env
    }

    pub fn build_spec(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(self.build.program.clone())
            .args(self.build.args.iter().cloned())
            .timeout(self.build_timeout);
        for (key, value) in self.child_env() {
            spec = spec.env(key, value);
        }
        spec
    }

    /// Apply `DISTFIX_*` overrides from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok(), &mut std::io::stderr())
    }

    pub fn apply_env_with<W: Write>(
        mut self,
        get_env: impl Fn(&str) -> Option<String>,
        writer: &mut W,
    ) -> Self {
        if let Some(raw) = get_env(ENV_BUILD_TIMEOUT) {
            let validator =
                EnvVarValidator::described(ENV_BUILD_TIMEOUT, "a positive number of seconds");
            self.build_timeout =
                validator.parse_with_writer(&raw, parse_timeout_secs, self.build_timeout, writer);
        }

        if let Some(raw) = get_env(ENV_MERGE) {
            let validator = EnvVarValidator::one_of(ENV_MERGE, MergeMode::VALID_VALUES);
            self.merge_mode =
                validator.parse_with_writer(&raw, MergeMode::parse_str, self.merge_mode, writer);
        }

        self
    }
}

/// Whole seconds, zero rejected
pub fn parse_timeout_secs(s: &str) -> Option<Duration> {
    match s.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

/// One `Normal` component: no root, no `.`/`..`, no separators
fn is_plain_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Parse a nested directory name; it must be a single plain path component
pub fn parse_nested_name(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if s.contains(['/', '\\']) || !is_plain_name(&path) {
        return Err(format!(
            "expected a directory name inside the output root, got '{}'",
            s
        ));
    }
    Ok(path)
}

/// Parse a `KEY=VALUE` pair; the key must be non-empty
pub fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
