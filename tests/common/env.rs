//! Test environment for isolated distfix runs.
//!
//! Provides `TestEnv` - a temp project directory, plus helpers to run the
//! distfix binary from it with a fake bundler.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Result of running the distfix binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory the binary runs in
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp project"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_distfix")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run distfix with raw arguments
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run distfix with raw arguments and extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("NO_COLOR", "1")
            .env("LANG", "C")
            .env_remove("LC_ALL")
            .env_remove("LC_CTYPE")
            .env_remove("RUST_LOG")
            .env_remove("NODE_ENV")
            .env_remove("DISTFIX_BUILD_TIMEOUT")
            .env_remove("DISTFIX_MERGE");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let started = Instant::now();
        let output = cmd.output().expect("Failed to execute distfix");
        to_result(output, started.elapsed())
    }

    /// Run distfix with `flags`, using `sh -c <script>` as the bundler
    pub fn run_build(&self, script: &str, flags: &[&str]) -> TestResult {
        self.run_build_with_env(script, flags, &[])
    }

    pub fn run_build_with_env(
        &self,
        script: &str,
        flags: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut args: Vec<&str> = flags.to_vec();
        args.extend(["--", "sh", "-c", script]);
        self.run_with_env(&args, env_vars)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.project_path(relative).exists()
    }

    /// Sorted names directly under `relative`
    pub fn list(&self, relative: &str) -> Vec<String> {
        list_dir(&self.project_path(relative))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn to_result(output: Output, elapsed: Duration) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        elapsed,
    }
}
