//! Child process runner with a wall-clock timeout

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::ports::{CommandOutcome, CommandRunner, CommandSpec};

/// Runs commands as real child processes.
///
/// stdout and stderr are drained on reader threads so a chatty child cannot
/// block on a full pipe while the caller polls for exit.
#[derive(Debug, Clone, Copy)]
pub struct SystemCommandRunner {
    poll_interval: Duration,
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutcome> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!(command = %spec, timeout_secs = spec.timeout.as_secs(), "spawning");
        let mut child = cmd.spawn()?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + spec.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                tracing::debug!(command = %spec, code = ?status.code(), "exited");
                return Ok(CommandOutcome {
                    success: status.success(),
                    code: status.code(),
                    stdout: collect(stdout),
                    stderr: collect(stderr),
                    timed_out: false,
                });
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(command = %spec, "Command timed out: {}", spec);
                let _ = child.kill();
                let _ = child.wait();
                // Readers stay detached: a grandchild may still hold the pipes.
                return Ok(CommandOutcome::timed_out(String::new()));
            }

            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }
}

fn drain<R>(pipe: Option<R>) -> Option<JoinHandle<String>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
