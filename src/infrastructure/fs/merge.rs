//! Directory merge
//!
//! Moves every direct child of a source directory into a destination
//! directory, then removes the drained source. A destination entry with the
//! same name is removed whole before the source entry lands: last writer
//! wins, contents are never combined.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::MergeError;
use crate::infrastructure::fs::LocalFs;

const STAGING_PREFIX: &str = ".distfix-staging-";
const HOLDING_PREFIX: &str = ".distfix-holding-";

/// Per-entry progress reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep<'a> {
    /// An existing destination entry was removed to make room
    Overwrote(&'a str),
    /// The entry now lives in the destination
    Moved(&'a str),
}

fn sorted_children(source: &Path) -> Result<Vec<OsString>, MergeError> {
    let read = fs::read_dir(source).map_err(|e| MergeError::new(source, e))?;
    let mut names = read
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| MergeError::new(source, e))?;
    names.sort();
    Ok(names)
}

/// The directory the merge drains from.
///
/// A child named like `source` itself would land on `source` mid-merge
/// (`dist/public/public`), so such a source is renamed into a holding dir
/// first and drained from there.
struct Detached {
    source: PathBuf,
    drained: PathBuf,
    holder: Option<TempDir>,
}

fn detach_source(source: &Path, dest: &Path, names: &[OsString]) -> Result<Detached, MergeError> {
    let self_named = source.parent() == Some(dest)
        && source
            .file_name()
            .is_some_and(|own| names.iter().any(|n| n.as_os_str() == own));
    if !self_named {
        return Ok(Detached {
            source: source.to_path_buf(),
            drained: source.to_path_buf(),
            holder: None,
        });
    }

    let holder = tempfile::Builder::new()
        .prefix(HOLDING_PREFIX)
        .tempdir_in(dest)
        .map_err(|e| MergeError::new(dest, e))?;
    let drained = holder.path().join("source");
    fs::rename(source, &drained).map_err(|e| MergeError::new(source, e))?;
    tracing::debug!(source = %source.display(), "source holds a same-named child, detached");
    Ok(Detached {
        source: source.to_path_buf(),
        drained,
        holder: Some(holder),
    })
}

impl Detached {
    /// Remove the drained source and any holding dir
    fn finish(self, fs: &LocalFs) -> Result<(), MergeError> {
        fs.remove_entry(&self.drained)
            .map_err(|e| MergeError::new(&self.drained, e))?;
        if let Some(holder) = self.holder {
            let path = holder.path().to_path_buf();
            holder.close().map_err(|e| MergeError::new(path, e))?;
        }
        Ok(())
    }

    /// After a failed merge, move a held source back to its own path.
    ///
    /// Entries are copied, never moved, so the held source is still complete.
    fn restore(self, fs: &LocalFs) {
        let Some(holder) = self.holder else {
            return;
        };

        // The same-named child may already occupy the source path.
        if fs.exists(&self.source) {
            if let Err(e) = fs.remove_entry(&self.source) {
                tracing::warn!(path = %self.source.display(), error = %e, "could not clear merge source path");
            }
        }
        match fs::rename(&self.drained, &self.source) {
            Ok(()) => {
                let _ = holder.close();
            }
            Err(e) => {
                let kept = holder.keep();
                tracing::warn!(path = %kept.display(), error = %e, "merge source left in holding dir");
            }
        }
    }
}

/// Runs `body` against the detached source, then cleans up or restores it
fn with_detached<T>(
    source: &Path,
    dest: &Path,
    body: impl FnOnce(&Path, &[OsString]) -> Result<T, MergeError>,
) -> Result<T, MergeError> {
    let fs = LocalFs::new();
    let names = sorted_children(source)?;
    let detached = detach_source(source, dest, &names)?;

    match body(&detached.drained, &names) {
        Ok(value) => {
            detached.finish(&fs)?;
            Ok(value)
        }
        Err(e) => {
            detached.restore(&fs);
            Err(e)
        }
    }
}

/// Remove-then-copy each child of `source` into `dest`.
///
/// Stops at the first error. Entries handled before it stay relocated and
/// `source` keeps all of its entries.
pub fn merge_into(
    source: &Path,
    dest: &Path,
    mut on_step: impl FnMut(MergeStep<'_>),
) -> Result<Vec<String>, MergeError> {
    with_detached(source, dest, |drained, names| {
        let fs = LocalFs::new();
        let mut moved = Vec::with_capacity(names.len());

        for name in names {
            let label = name.to_string_lossy().into_owned();
            let from = drained.join(name);
            let to = dest.join(name);

            if fs.exists(&to) {
                fs.remove_entry(&to).map_err(|e| MergeError::new(&to, e))?;
                on_step(MergeStep::Overwrote(&label));
            }
            fs.copy_entry(&from, &to)
                .map_err(|e| MergeError::new(&from, e))?;

            tracing::trace!(entry = %label, "relocated");
            on_step(MergeStep::Moved(&label));
            moved.push(label);
        }
        Ok(moved)
    })
}

/// Copy every child into a staging directory inside `dest` first, then
/// rename each staged entry over its destination.
///
/// A failure while copying leaves `dest` and `source` untouched.
pub fn merge_into_staged(
    source: &Path,
    dest: &Path,
    mut on_step: impl FnMut(MergeStep<'_>),
) -> Result<Vec<String>, MergeError> {
    with_detached(source, dest, |drained, names| {
        let fs = LocalFs::new();
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(dest)
            .map_err(|e| MergeError::new(dest, e))?;

        for name in names {
            let from = drained.join(name);
            fs.copy_entry(&from, &staging.path().join(name))
                .map_err(|e| MergeError::new(&from, e))?;
        }
        tracing::debug!(count = names.len(), staging = %staging.path().display(), "staged");

        let mut moved = Vec::with_capacity(names.len());
        for name in names {
            let label = name.to_string_lossy().into_owned();
            let to = dest.join(name);

            if fs.exists(&to) {
                fs.remove_entry(&to).map_err(|e| MergeError::new(&to, e))?;
                on_step(MergeStep::Overwrote(&label));
            }
            fs::rename(staging.path().join(name), &to).map_err(|e| MergeError::new(&to, e))?;

            on_step(MergeStep::Moved(&label));
            moved.push(label);
        }

        let staging_path = staging.path().to_path_buf();
        staging
            .close()
            .map_err(|e| MergeError::new(staging_path, e))?;
        Ok(moved)
    })
}
