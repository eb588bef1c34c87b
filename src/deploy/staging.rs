//! Copying the project tree into the sandbox
//!
//! Every entry of the source directory, hidden ones included, is copied into
//! the destination. An existing destination entry with the same name is
//! removed first, so directories are replaced rather than merged.
//!
//! There is no rollback: an interrupted copy leaves the destination partially
//! updated.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::MethdevError;
use crate::utils::{paths, terminal};

/// Summary of one staging pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StagingReport {
    /// Top-level entries copied
    pub entries: usize,
    /// Files and symlinks written
    pub files: u64,
}

/// Whether `name` is one of the two reflexive directory entries
///
/// Exact match only: `..foo` or `.hidden` are ordinary entries.
pub fn is_reflexive_entry(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// List the top-level entries of `source`, sorted by name
pub fn enumerate_entries(source: &Path) -> Result<Vec<PathBuf>, MethdevError> {
    let read_dir =
        fs::read_dir(source).map_err(|e| MethdevError::io("Failed to read", source, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| MethdevError::io("Failed to read", source, e))?;
        // read_dir omits these today; the exclusion must stay an exact-name match
        if is_reflexive_entry(&entry.file_name()) {
            continue;
        }
        entries.push(entry.path());
    }

    entries.sort();
    Ok(entries)
}

/// Copy the tree under `source` into `destination`
///
/// Fails without touching either tree if the two directories overlap;
/// otherwise `destination` is created if absent.
pub fn stage_tree(
    source: &Path,
    destination: &Path,
    verbose: bool,
) -> Result<StagingReport, MethdevError> {
    check_disjoint(source, destination)?;
    paths::ensure_dir(destination)?;

    let entries = enumerate_entries(source)?;
    if verbose {
        terminal::print_info(&format!(
            "Staging {} entries from {} to {}",
            entries.len(),
            source.display(),
            destination.display()
        ));
    }

    let pb = terminal::create_progress_bar(entries.len() as u64, "Staging");
    let mut report = StagingReport::default();

    for entry in &entries {
        // enumerate_entries only yields paths with a final component
        let Some(name) = entry.file_name() else {
            continue;
        };
        let target = destination.join(name);

        paths::remove_entry(&target)?;
        report.files += copy_recursive(entry, &target)?;
        report.entries += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(report)
}

/// Refuse to copy a tree into itself or over its own ancestor
fn check_disjoint(source: &Path, destination: &Path) -> Result<(), MethdevError> {
    let source = source
        .canonicalize()
        .map_err(|e| MethdevError::io("Failed to resolve", source, e))?;
    let destination = resolve_lenient(destination)?;

    if destination.starts_with(&source) || source.starts_with(&destination) {
        return Err(MethdevError::filesystem(format!(
            "sandbox directory {} overlaps the project directory {}",
            destination.display(),
            source.display()
        )));
    }
    Ok(())
}

/// Canonicalize the nearest existing ancestor of `path` and re-append the
/// components that do not exist yet
fn resolve_lenient(path: &Path) -> Result<PathBuf, MethdevError> {
    let mut existing = path;
    let mut missing = Vec::new();

    while !existing.exists() {
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                missing.push(name);
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .map_err(|e| MethdevError::io("Failed to resolve", path, e))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

/// Copy `src` (file, symlink or directory) to `dst`, returning files written
fn copy_recursive(src: &Path, dst: &Path) -> Result<u64, MethdevError> {
    let mut files = 0;

    for entry in WalkDir::new(src).follow_links(false).follow_root_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            MethdevError::Filesystem {
                message: format!("Failed to walk {}: {}", path.display(), e),
                source: e.into_io_error(),
            }
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(Path::new(""));
        let target = if relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| MethdevError::io("Failed to create directory", &target, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            files += 1;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| MethdevError::io("Failed to copy", entry.path(), e))?;
            files += 1;
        }
    }

    Ok(files)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<(), MethdevError> {
    let link = fs::read_link(src).map_err(|e| MethdevError::io("Failed to read link", src, e))?;
    std::os::unix::fs::symlink(&link, dst)
        .map_err(|e| MethdevError::io("Failed to create link", dst, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<(), MethdevError> {
    if src.is_dir() {
        return copy_recursive_followed(src, dst);
    }
    fs::copy(src, dst)
        .map(|_| ())
        .map_err(|e| MethdevError::io("Failed to copy", src, e))
}

#[cfg(not(unix))]
fn copy_recursive_followed(src: &Path, dst: &Path) -> Result<(), MethdevError> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| MethdevError::filesystem(e.to_string()))?;
        let relative = entry.path().strip_prefix(src).unwrap_or(Path::new(""));
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| MethdevError::io("Failed to create directory", &target, e))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| MethdevError::io("Failed to copy", entry.path(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/meth")).unwrap();
        fs::create_dir_all(root.join("test")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("shard.yml"), "name: meth\n").unwrap();
        fs::write(root.join("src/meth/lexer.cr"), "# lexer\n").unwrap();
        fs::write(root.join("test/main.mh"), "fn main() {}\n").unwrap();
        fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(root.join(".editorconfig"), "root = true\n").unwrap();
        fs::write(root.join("..notes"), "dots\n").unwrap();

        temp_dir
    }

    fn names(entries: &[PathBuf]) -> Vec<String> {
        entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_is_reflexive_entry_exact() {
        assert!(is_reflexive_entry(OsStr::new(".")));
        assert!(is_reflexive_entry(OsStr::new("..")));
        assert!(!is_reflexive_entry(OsStr::new("...")));
        assert!(!is_reflexive_entry(OsStr::new("..notes")));
        assert!(!is_reflexive_entry(OsStr::new(".git")));
        assert!(!is_reflexive_entry(OsStr::new("a..b")));
    }

    #[test]
    fn test_enumerate_includes_hidden() {
        let project = create_project();
        let entries = enumerate_entries(project.path()).unwrap();
        assert_eq!(
            names(&entries),
            vec!["..notes", ".editorconfig", ".git", "shard.yml", "src", "test"]
        );
    }

    #[test]
    fn test_stage_tree_copies_everything() {
        let project = create_project();
        let home = TempDir::new().unwrap();
        let dest = home.path().join("temp/crystal/meth");

        let report = stage_tree(project.path(), &dest, false).unwrap();
        assert_eq!(report.entries, 6);
        assert_eq!(report.files, 6);

        for rel in [
            "shard.yml",
            "src/meth/lexer.cr",
            "test/main.mh",
            ".git/HEAD",
            ".editorconfig",
            "..notes",
        ] {
            assert_eq!(
                fs::read(project.path().join(rel)).unwrap(),
                fs::read(dest.join(rel)).unwrap(),
                "{rel} differs"
            );
        }
    }

    #[test]
    fn test_stage_tree_replaces_existing_entries() {
        let project = create_project();
        let home = TempDir::new().unwrap();
        let dest = home.path().join("meth");
        fs::create_dir_all(dest.join("src/stale")).unwrap();
        fs::write(dest.join("src/stale/old.cr"), "old").unwrap();
        fs::write(dest.join("shard.yml"), "stale").unwrap();
        fs::create_dir_all(dest.join("bin")).unwrap();
        fs::write(dest.join("bin/meth"), "prior build").unwrap();

        stage_tree(project.path(), &dest, false).unwrap();

        // same-named directories are replaced, not merged
        assert!(!dest.join("src/stale").exists());
        assert_eq!(fs::read_to_string(dest.join("shard.yml")).unwrap(), "name: meth\n");
        // entries absent from the source are left alone
        assert_eq!(fs::read_to_string(dest.join("bin/meth")).unwrap(), "prior build");
    }

    #[test]
    fn test_stage_tree_file_over_directory() {
        let project = create_project();
        let home = TempDir::new().unwrap();
        let dest = home.path().join("meth");
        fs::create_dir_all(dest.join("shard.yml")).unwrap();

        stage_tree(project.path(), &dest, false).unwrap();
        assert!(dest.join("shard.yml").is_file());
    }

    #[test]
    fn test_stage_tree_rejects_nested_destination() {
        let project = create_project();
        let before = enumerate_entries(project.path()).unwrap();
        let dest = project.path().join("temp/crystal/meth");

        let err = stage_tree(project.path(), &dest, false).unwrap_err();
        assert!(matches!(err, MethdevError::Filesystem { .. }));
        assert!(!project.path().join("temp").exists());
        assert_eq!(enumerate_entries(project.path()).unwrap(), before);
    }

    #[test]
    fn test_resolve_lenient_missing_tail() {
        let home = TempDir::new().unwrap();
        let resolved = resolve_lenient(&home.path().join("temp/crystal/meth")).unwrap();
        assert_eq!(
            resolved,
            home.path().canonicalize().unwrap().join("temp/crystal/meth")
        );
        assert!(!home.path().join("temp").exists());
    }

    #[test]
    fn test_stage_tree_rejects_same_directory() {
        let project = create_project();
        let err = stage_tree(project.path(), project.path(), false).unwrap_err();
        assert!(matches!(err, MethdevError::Filesystem { .. }));
        assert!(project.path().join("shard.yml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_stage_tree_keeps_symlinks_and_modes() {
        use std::os::unix::fs::PermissionsExt;

        let project = create_project();
        fs::create_dir_all(project.path().join("bin")).unwrap();
        let exe = project.path().join("bin/meth");
        fs::write(&exe, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        std::os::unix::fs::symlink("src", project.path().join("src-link")).unwrap();

        let home = TempDir::new().unwrap();
        let dest = home.path().join("meth");
        stage_tree(project.path(), &dest, false).unwrap();

        let mode = fs::metadata(dest.join("bin/meth")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
        let link = dest.join("src-link");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("src"));
    }
}
