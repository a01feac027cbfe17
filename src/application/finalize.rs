//! Finalize Use Case
//!
//! Drives the five stages in order:
//! 1. Clean - remove any previous output root
//! 2. Configure - assemble the child environment (`NODE_ENV=production`)
//! 3. Build - run the bundler with a timeout
//! 4. Relocate - flatten the nested output directory into the root
//! 5. Verify - require the marker file, then list the root
//!
//! Every failure is returned as a `FinalizeError`; deciding the exit status
//! is left to the binary.

use std::path::{Path, PathBuf};

use crate::config::{FinalizeConfig, MergeMode};
use crate::domain::ports::{
    CommandRunner, CommandSpec, FinalizeEvent, FinalizeEventSink, NoopEventSink,
};
use crate::domain::Stage;
use crate::error::{FinalizeError, FinalizeResult};
use crate::infrastructure::fs::{merge_into, merge_into_staged, LocalFs, MergeStep};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReport {
    pub output_root: PathBuf,
    /// Entries moved out of the nested directory
    pub relocated: Vec<String>,
    /// Server artifacts removed from the root
    pub stripped: Vec<String>,
    /// Final listing of the root, sorted
    pub entries: Vec<String>,
    /// True when the nested directory was absent and flat output was accepted
    pub flat: bool,
}

pub struct FinalizeUseCase<R: CommandRunner> {
    runner: R,
    fs: LocalFs,
}

impl<R: CommandRunner> FinalizeUseCase<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            fs: LocalFs::new(),
        }
    }

    /// Run all stages silently
    pub fn execute(&self, config: &FinalizeConfig) -> FinalizeResult<FinalizeReport> {
        self.execute_with_events(config, &NoopEventSink)
    }

    /// Run all stages, reporting progress to `sink`
    pub fn execute_with_events(
        &self,
        config: &FinalizeConfig,
        sink: &dyn FinalizeEventSink,
    ) -> FinalizeResult<FinalizeReport> {
        self.clean(config, sink)?;
        let spec = self.configure(config, sink);
        self.build(&spec, sink)?;
        let (relocated, flat) = self.relocate(config, sink)?;
        self.verify(config, relocated, flat, sink)
    }

    fn enter(&self, stage: Stage, sink: &dyn FinalizeEventSink) {
        tracing::debug!(stage = %stage, "entering stage");
        sink.on_event(FinalizeEvent::StageStarted { stage });
    }

    fn clean(&self, config: &FinalizeConfig, sink: &dyn FinalizeEventSink) -> FinalizeResult<()> {
        self.enter(Stage::Clean, sink);
        let root = &config.output_root;
        let existed = self
            .fs
            .remove_if_exists(root)
            .map_err(|source| FinalizeError::Clean {
                path: root.clone(),
                source,
            })?;
        sink.on_event(FinalizeEvent::Cleaned {
            path: root.clone(),
            existed,
        });
        Ok(())
    }

    fn configure(&self, config: &FinalizeConfig, sink: &dyn FinalizeEventSink) -> CommandSpec {
        self.enter(Stage::Configure, sink);
        let spec = config.build_spec();
        for (key, value) in &spec.env {
            tracing::debug!(%key, %value, "child environment");
        }
        spec
    }

    fn build(&self, spec: &CommandSpec, sink: &dyn FinalizeEventSink) -> FinalizeResult<()> {
        self.enter(Stage::Build, sink);
        let command = spec.to_string();
        sink.on_event(FinalizeEvent::BuildStarted {
            command: command.clone(),
        });

        let outcome = self
            .runner
            .run(spec)
            .map_err(|source| FinalizeError::BuildSpawn {
                command: command.clone(),
                source,
            })?;

        if outcome.timed_out {
            sink.on_event(FinalizeEvent::CommandTimedOut {
                command: command.clone(),
                timeout: spec.timeout,
            });
            return Err(FinalizeError::BuildTimedOut {
                command,
                timeout: spec.timeout,
            });
        }

        if !outcome.success {
            return Err(FinalizeError::BuildFailed {
                command,
                code: outcome.code,
                stderr: outcome.stderr,
            });
        }

        sink.on_event(FinalizeEvent::BuildFinished {
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        });
        Ok(())
    }

    fn relocate(
        &self,
        config: &FinalizeConfig,
        sink: &dyn FinalizeEventSink,
    ) -> FinalizeResult<(Vec<String>, bool)> {
        self.enter(Stage::Relocate, sink);
        let root = &config.output_root;
        let nested = config.nested_path();

        // Merging drains and deletes the nested dir; it must sit inside the root.
        if !config.nested_is_child() || nested.parent() != Some(root.as_path()) {
            return Err(FinalizeError::NestedOutsideRoot {
                path: config.nested_dir.clone(),
                root: root.clone(),
            });
        }

        if !self.fs.is_dir(&nested) {
            if config.allow_flat_output && self.fs.is_dir(root) {
                sink.on_event(FinalizeEvent::FlatOutput { root: root.clone() });
                return Ok((Vec::new(), true));
            }
            return Err(FinalizeError::NestedMissing { path: nested });
        }

        let entries = self
            .fs
            .list_names(&nested)
            .map_err(|source| crate::error::MergeError::new(&nested, source))?;
        sink.on_event(FinalizeEvent::RelocateStarted {
            from: nested.clone(),
            to: root.clone(),
            entries,
        });

        let on_step = |step: MergeStep<'_>| match step {
            MergeStep::Overwrote(name) => sink.on_event(FinalizeEvent::Overwrote {
                name: name.to_string(),
            }),
            MergeStep::Moved(name) => sink.on_event(FinalizeEvent::EntryMoved {
                name: name.to_string(),
            }),
        };
        let moved = match config.merge_mode {
            MergeMode::Direct => merge_into(&nested, root, on_step)?,
            MergeMode::Staged => merge_into_staged(&nested, root, on_step)?,
        };

        sink.on_event(FinalizeEvent::NestedRemoved { path: nested });
        Ok((moved, false))
    }

    fn verify(
        &self,
        config: &FinalizeConfig,
        relocated: Vec<String>,
        flat: bool,
        sink: &dyn FinalizeEventSink,
    ) -> FinalizeResult<FinalizeReport> {
        self.enter(Stage::Verify, sink);
        let root = &config.output_root;

        let marker = config.marker_path();
        if !self.fs.is_file(&marker) {
            return Err(FinalizeError::MarkerMissing {
                root: root.clone(),
                marker: config.marker.clone(),
            });
        }
        sink.on_event(FinalizeEvent::MarkerFound { path: marker });

        let entries = self.list(root)?;
        if !entries.iter().any(|name| is_asset_name(name)) {
            sink.on_event(FinalizeEvent::Warning {
                message: "No obvious asset files found".to_string(),
            });
        }

        let stripped = if config.strip_server_files {
            self.strip_server_files(root, &entries, &config.marker, sink)?
        } else {
            Vec::new()
        };

        let entries = if stripped.is_empty() {
            entries
        } else {
            self.list(root)?
        };
        sink.on_event(FinalizeEvent::Listed {
            root: root.clone(),
            entries: entries.clone(),
        });
        sink.on_event(FinalizeEvent::Completed);

        Ok(FinalizeReport {
            output_root: root.clone(),
            relocated,
            stripped,
            entries,
            flat,
        })
    }

    fn strip_server_files(
        &self,
        root: &Path,
        entries: &[String],
        marker: &str,
        sink: &dyn FinalizeEventSink,
    ) -> FinalizeResult<Vec<String>> {
        let mut stripped = Vec::new();
        for name in entries.iter().filter(|n| n.as_str() != marker && is_server_artifact(n)) {
            let path = root.join(name);
            self.fs
                .remove_entry(&path)
                .map_err(|source| FinalizeError::Strip { path, source })?;
            sink.on_event(FinalizeEvent::ServerFileRemoved { name: name.clone() });
            stripped.push(name.clone());
        }
        Ok(stripped)
    }

    fn list(&self, root: &Path) -> FinalizeResult<Vec<String>> {
        self.fs
            .list_names(root)
            .map_err(|source| FinalizeError::List {
                path: root.to_path_buf(),
                source,
            })
    }
}

/// Server-side bundle output that a static host should not serve
pub fn is_server_artifact(name: &str) -> bool {
    name == "index.js" || name.contains("server") || name.contains("node_modules")
}

/// Heuristic for "this looks like front-end output"
pub fn is_asset_name(name: &str) -> bool {
    name.starts_with("assets") || name.ends_with(".js") || name.ends_with(".css")
}
