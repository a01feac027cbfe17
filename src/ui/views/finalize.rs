//! Finalize run UI views
//!
//! Each function renders one piece of output as a `String` (trailing
//! newline included) so the console sink decides where it goes.

use distfix::{FinalizeConfig, FinalizeError, FinalizeEvent, Stage};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Where a rendered line belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub fn render_header(config: &FinalizeConfig, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Build, "Building frontend for static deployment");
    header.add("Output", config.output_root.display().to_string());
    header.add("Nested", config.nested_path().display().to_string());
    header.add("Build", build_label(config));
    header.render(supports_color, supports_unicode)
}

fn build_label(config: &FinalizeConfig) -> String {
    std::iter::once(config.build.program.as_str())
        .chain(config.build.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn line(icon: Icon, text: impl AsRef<str>, color: bool, unicode: bool) -> String {
    format!("{} {}\n", icon.colored(color, unicode), text.as_ref())
}

/// Render one event; `None` means nothing to show at this verbosity
pub fn render_event(
    event: &FinalizeEvent,
    verbose: u8,
    color: bool,
    unicode: bool,
) -> Option<(Stream, String)> {
    let out = |s: String| Some((Stream::Stdout, s));
    let err = |s: String| Some((Stream::Stderr, s));
    let detail = verbose > 0;

    match event {
        FinalizeEvent::StageStarted { stage } if detail => out(format!(
            "{}\n",
            ColoredText::dim(format!("[{}/{}] {}", stage.position(), Stage::ALL.len(), stage))
                .render(color)
        )),
        FinalizeEvent::StageStarted { .. } => None,
        FinalizeEvent::Cleaned {
            path,
            existed: true,
        } => out(line(
            Icon::Trash,
            format!("Removed previous {}", path.display()),
            color,
            unicode,
        )),
        FinalizeEvent::Cleaned { path, .. } if detail => out(format!(
            "{}\n",
            ColoredText::dim(format!("{} not present, nothing to clean", path.display()))
                .render(color)
        )),
        FinalizeEvent::Cleaned { .. } => None,
        FinalizeEvent::BuildStarted { command } => out(line(
            Icon::Progress,
            format!("Running {}...", command),
            color,
            unicode,
        )),
        FinalizeEvent::CommandTimedOut { command, timeout } => err(line(
            Icon::Warning,
            ColoredText::warning(format!(
                "Command timed out after {}s: {}",
                timeout.as_secs(),
                command
            ))
            .render(color),
            color,
            unicode,
        )),
        FinalizeEvent::BuildFinished { stdout, stderr } => {
            let mut s = line(Icon::Success, "Build completed", color, unicode);
            if detail {
                for l in stdout.lines().filter(|l| !l.trim().is_empty()) {
                    s.push_str(&format!("  {}\n", ColoredText::dim(l).render(color)));
                }
                if is_noteworthy_stderr(stderr) {
                    s.push_str("Build stderr:\n");
                    for l in stderr.lines().filter(|l| !l.trim().is_empty()) {
                        s.push_str(&format!("  {}\n", ColoredText::warning(l).render(color)));
                    }
                }
            }
            out(s)
        }
        FinalizeEvent::RelocateStarted { from, to, entries } => out(format!(
            "Moving files from {} to {} root...\nFound {} items to move: {}\n",
            from.display(),
            to.display(),
            entries.len(),
            entries.join(", ")
        )),
        FinalizeEvent::Overwrote { name } => err(line(
            Icon::Warning,
            format!("Overwriting existing {}", name),
            color,
            unicode,
        )),
        FinalizeEvent::EntryMoved { name } if detail => out(format!(
            "  {} Moved: {}\n",
            Icon::Arrow.colored(color, unicode),
            name
        )),
        FinalizeEvent::EntryMoved { .. } => None,
        FinalizeEvent::NestedRemoved { path } => {
            let mut s = String::new();
            if detail {
                s.push_str(&format!("Removed {} directory\n", path.display()));
            }
            s.push_str(&line(Icon::Success, "Files moved successfully", color, unicode));
            out(s)
        }
        FinalizeEvent::FlatOutput { root } => out(format!(
            "Files already built to {} root (no nested directory found)\n",
            root.display()
        )),
        FinalizeEvent::MarkerFound { path } => out(line(
            Icon::Success,
            format!("{} found", path.display()),
            color,
            unicode,
        )),
        FinalizeEvent::ServerFileRemoved { name } => out(line(
            Icon::Trash,
            format!("Removed server file: {}", name),
            color,
            unicode,
        )),
        FinalizeEvent::Warning { message } => err(line(
            Icon::Warning,
            ColoredText::warning(message.as_str()).render(color),
            color,
            unicode,
        )),
        FinalizeEvent::Listed { root, entries } => out(format!(
            "Final {} contents: {}\n",
            root.display(),
            entries.join(", ")
        )),
        FinalizeEvent::Completed => out(line(
            Icon::Success,
            ColoredText::success("Build complete! Ready for static deployment.")
                .bold()
                .render(color),
            color,
            unicode,
        )),
    }
}

/// Bundler warnings and Browserslist nags are routine on stderr
fn is_noteworthy_stderr(stderr: &str) -> bool {
    !stderr.trim().is_empty() && !stderr.contains("warning") && !stderr.contains("Browserslist")
}

/// Render a terminal failure; build failures carry the build's stderr below
pub fn render_error(error: &anyhow::Error, color: bool, unicode: bool) -> String {
    let finalize = error.downcast_ref::<FinalizeError>();
    let headline = match finalize {
        Some(FinalizeError::BuildFailed { command, code, .. }) => {
            let status = match code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            format!("Build failed ({}): {}", status, command)
        }
        Some(FinalizeError::BuildTimedOut { command, timeout }) => format!(
            "Build failed (timed out after {}s): {}",
            timeout.as_secs(),
            command
        ),
        _ => error.to_string(),
    };

    let mut s = line(
        Icon::Error,
        ColoredText::error(headline).render(color),
        color,
        unicode,
    );
    for l in finalize.and_then(FinalizeError::build_stderr).unwrap_or_default().lines() {
        s.push_str(&format!("  {}\n", l));
    }
    s
}
