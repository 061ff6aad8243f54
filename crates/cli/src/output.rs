//! Report sinks.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Writes `report` to `path`, or to stdout when no path is given.
///
/// Files get the report verbatim; stdout gets a trailing newline.
pub fn write_report(path: Option<&Path>, report: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("failed to write report to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            if !report.is_empty() {
                writeln!(stdout, "{report}").context("failed to write report to stdout")?;
            }
            stdout.flush().context("failed to flush stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_report(Some(&path), "a\nb").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_report(Some(&path), "x").unwrap_err();
        assert!(err.to_string().contains("failed to write report"));
    }
}
