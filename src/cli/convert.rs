//! Local file mode: read a key/value file and write it as .env lines.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::output;
use crate::cli::PolicyArgs;
use crate::core::{env, writer};
use crate::error::{Error, Result};

/// Convert a local source file.
///
/// Dangling keys (a bare key with no value line) degrade the run instead
/// of failing it: each one is reported, and if the output would clobber
/// the source, it is redirected to `<source>.out`. The exit code stays 0.
pub fn execute(source: &Path, output: Option<PathBuf>, args: &PolicyArgs) -> Result<()> {
    if !source.exists() {
        return Err(Error::SourceNotFound(source.to_path_buf()));
    }

    let text = fs::read_to_string(source)?;
    let (mut vars, dangling) = env::parse(&text);
    debug!(
        variables = vars.len(),
        dangling = dangling.len(),
        "parsed source file"
    );

    let mut dest = output.unwrap_or_else(|| PathBuf::from(".env"));
    if !dangling.is_empty() {
        if dest == source {
            dest = with_out_suffix(source);
        }
        output::warn(&format!(
            "some keys had no value; output saved to '{}'",
            dest.display()
        ));
        for issue in &dangling {
            output::error(&issue.to_string());
        }
    }

    let report = writer::write(
        &dest,
        &mut vars,
        &args.policy(),
        args.overwrite,
        &args.preserve_set(),
    )?;

    if let Some(backup) = &report.backup {
        output::hint(&format!("existing file backed up to {}", backup.display()));
    }
    if dangling.is_empty() {
        output::success(&format!(
            "wrote {} variables to '{}'",
            report.written,
            dest.display()
        ));
    }

    Ok(())
}

fn with_out_suffix(path: &Path) -> PathBuf {
    let mut out: OsString = path.into();
    out.push(".out");
    PathBuf::from(out)
}
