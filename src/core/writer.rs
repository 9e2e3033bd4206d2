//! Destination-file handling: preserve-merge, backups, and the final write.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::env::{self, OutputPolicy, Vars};
use crate::error::{Error, Result};

/// Outcome of a successful write.
#[derive(Debug)]
pub struct WriteReport {
    /// Number of variable lines written (after filtering).
    pub written: usize,
    /// Backup file created before overwriting, if any.
    pub backup: Option<PathBuf>,
}

/// Write `vars` to `dest` as `.env` lines.
///
/// Steps, in order:
/// 1. Preserve-merge: for every name in `preserve` that exists in the
///    current destination file, the on-disk value replaces the new one.
///    This runs before the destination is touched, so the values being
///    preserved are the ones actually on disk.
/// 2. Backup: unless `overwrite` is set, an existing destination is
///    copied to `dest.backup.N` (smallest unused N) before being
///    replaced. A failed backup aborts the whole write.
/// 3. The formatted text replaces the destination (create-or-truncate).
pub fn write(
    dest: &Path,
    vars: &mut Vars,
    policy: &OutputPolicy,
    overwrite: bool,
    preserve: &BTreeSet<String>,
) -> Result<WriteReport> {
    if !preserve.is_empty() && dest.exists() {
        let prior_text = fs::read_to_string(dest)?;
        let (prior, _) = env::parse(&prior_text);
        for name in preserve {
            if let Some(old) = prior.get(name) {
                debug!(name = %name, "preserving existing value");
                vars.insert(name.clone(), old.clone());
            }
        }
    }

    let backup = if !overwrite && dest.exists() {
        let backup_path = next_backup_path(dest);
        fs::copy(dest, &backup_path).map_err(|source| Error::BackupFailed {
            path: backup_path.clone(),
            source,
        })?;
        debug!(backup = %backup_path.display(), "backed up existing file");
        Some(backup_path)
    } else {
        None
    };

    let text = env::format(vars, policy);
    let written = text.lines().count();
    fs::write(dest, text).map_err(|source| Error::WriteFailed {
        path: dest.to_path_buf(),
        source,
    })?;

    debug!(dest = %dest.display(), written, "wrote variables");
    Ok(WriteReport { written, backup })
}

/// First `dest.backup.N` path (N = 1, 2, 3, ...) that does not exist yet.
fn next_backup_path(dest: &Path) -> PathBuf {
    let mut n = 1u32;
    loop {
        let mut candidate: OsString = dest.into();
        candidate.push(format!(".backup.{n}"));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn policy() -> OutputPolicy {
        OutputPolicy {
            lowercase_filter: false,
            ..OutputPolicy::default()
        }
    }

    #[test]
    fn test_write_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join(".env");

        let report = write(
            &dest,
            &mut vars(&[("A", "1"), ("B", "2")]),
            &policy(),
            false,
            &BTreeSet::new(),
        )
        .unwrap();

        assert_eq!(report.written, 2);
        assert!(report.backup.is_none());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "A=1\nB=2\n");
    }

    #[test]
    fn test_backup_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join(".env");
        fs::write(&dest, "ORIGINAL=1\n").unwrap();

        let first = write(
            &dest,
            &mut vars(&[("A", "1")]),
            &policy(),
            false,
            &BTreeSet::new(),
        )
        .unwrap();
        let second = write(
            &dest,
            &mut vars(&[("B", "2")]),
            &policy(),
            false,
            &BTreeSet::new(),
        )
        .unwrap();

        let backup1 = dir.path().join(".env.backup.1");
        let backup2 = dir.path().join(".env.backup.2");
        assert_eq!(first.backup.as_deref(), Some(backup1.as_path()));
        assert_eq!(second.backup.as_deref(), Some(backup2.as_path()));
        // prior backups stay untouched
        assert_eq!(fs::read_to_string(&backup1).unwrap(), "ORIGINAL=1\n");
        assert_eq!(fs::read_to_string(&backup2).unwrap(), "A=1\n");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "B=2\n");
    }

    #[test]
    fn test_overwrite_skips_backup() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join(".env");
        fs::write(&dest, "OLD=1\n").unwrap();

        let report = write(
            &dest,
            &mut vars(&[("NEW", "2")]),
            &policy(),
            true,
            &BTreeSet::new(),
        )
        .unwrap();

        assert!(report.backup.is_none());
        assert!(!dir.path().join(".env.backup.1").exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "NEW=2\n");
    }

    #[test]
    fn test_preserve_keeps_on_disk_value() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join(".env");
        fs::write(&dest, "A=1\n").unwrap();

        let preserve: BTreeSet<String> = ["A".to_string()].into();
        let mut new_vars = vars(&[("A", "2"), ("B", "3")]);
        write(&dest, &mut new_vars, &policy(), true, &preserve).unwrap();

        let written = fs::read_to_string(&dest).unwrap();
        assert!(written.contains("A=1\n"));
        assert!(written.contains("B=3\n"));
    }

    #[test]
    fn test_preserve_ignores_names_missing_from_prior() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join(".env");
        fs::write(&dest, "OTHER=x\n").unwrap();

        let preserve: BTreeSet<String> = ["A".to_string()].into();
        let mut new_vars = vars(&[("A", "2")]);
        write(&dest, &mut new_vars, &policy(), true, &preserve).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "A=2\n");
    }
}
