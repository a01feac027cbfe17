//! Local File System Helpers
//!
//! Thin wrappers over `std::fs` with the semantics the finalizer needs:
//! idempotent removal, sorted listings, and recursive copies.

use std::fs;
use std::io;
use std::path::Path;

/// Local file system operations
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    pub fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    pub fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Remove a file, symlink or directory tree.
    ///
    /// Returns `Ok(false)` when nothing was there.
    pub fn remove_if_exists(&self, path: &Path) -> io::Result<bool> {
        match fs::symlink_metadata(path) {
            Ok(_) => self.remove_entry(path).map(|_| true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove an existing entry. Symlinks are unlinked, never followed.
    pub fn remove_entry(&self, path: &Path) -> io::Result<()> {
        let meta = fs::symlink_metadata(path)?;
        if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    /// Copy a file or directory tree to `dest`, which must not exist
    pub fn copy_entry(&self, src: &Path, dest: &Path) -> io::Result<()> {
        if src.is_dir() {
            fs::create_dir(dest)?;
            for entry in fs::read_dir(src)? {
                let entry = entry?;
                self.copy_entry(&entry.path(), &dest.join(entry.file_name()))?;
            }
            Ok(())
        } else {
            fs::copy(src, dest).map(|_| ())
        }
    }

    /// Names of the immediate children of `dir`, sorted
    pub fn list_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_if_exists_is_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("dist");
        let fs = LocalFs::new();

        assert!(!fs.remove_if_exists(&target).unwrap());

        std::fs::create_dir_all(target.join("public/assets")).unwrap();
        std::fs::write(target.join("public/assets/app.js"), "x").unwrap();

        assert!(fs.remove_if_exists(&target).unwrap());
        assert!(!target.exists());
        assert!(!fs.remove_if_exists(&target).unwrap());
    }

    #[test]
    fn remove_if_exists_handles_plain_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("dist");
        std::fs::write(&target, "not a directory").unwrap();

        assert!(LocalFs::new().remove_if_exists(&target).unwrap());
        assert!(!target.exists());
    }

    #[test]
    fn copy_entry_copies_tree() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("a/b")).unwrap();
        std::fs::write(src.join("a/b/c.txt"), "deep").unwrap();
        std::fs::write(src.join("top.txt"), "top").unwrap();

        let dest = dir.path().join("copy");
        LocalFs::new().copy_entry(&src, &dest).unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("a/b/c.txt")).unwrap(), "deep");
        assert_eq!(std::fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert!(src.exists(), "copy must leave the source alone");
    }

    #[test]
    fn list_names_is_sorted() {
        let dir = tempdir().unwrap();
        for name in ["index.html", "assets", "favicon.ico"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let names = LocalFs::new().list_names(dir.path()).unwrap();
        assert_eq!(names, vec!["assets", "favicon.ico", "index.html"]);
    }

    #[cfg(unix)]
    #[test]
    fn remove_entry_unlinks_symlink_without_following() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("keep.txt"), "keep").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        LocalFs::new().remove_entry(&link).unwrap();

        assert!(!link.exists());
        assert!(real.join("keep.txt").exists());
    }
}
