// crates/cli/src/presentation.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{AppError, Result};

/// Write one line per entry, each terminated by `\n`.
///
/// # Errors
/// Propagates any write failure.
pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Emit results to `path` (created or truncated) or, if `None`, to stdout.
///
/// # Errors
/// [`AppError::Output`] when the file cannot be created or written,
/// [`AppError::Io`] for stdout failures.
pub fn emit(lines: &[String], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let to_err = |source| AppError::Output {
                path: path.to_path_buf(),
                source,
            };
            let file = File::create(path).map_err(to_err)?;
            write_lines(&mut BufWriter::new(file), lines).map_err(to_err)
        }
        None => {
            let stdout = io::stdout();
            write_lines(&mut stdout.lock(), lines)?;
            Ok(())
        }
    }
}

pub fn print_timing(elapsed: std::time::Duration) {
    eprintln!("Processing time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lines_terminates_each_line() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &["A=1.0/2.0/3.0".to_string(), "B=2.0/2.0/2.0".to_string()]).unwrap();
        assert_eq!(buf, b"A=1.0/2.0/3.0\nB=2.0/2.0/2.0\n");
    }

    #[test]
    fn test_write_no_lines_writes_nothing() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        emit(&["X=5.1/5.1/5.1".to_string()], Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "X=5.1/5.1/5.1\n");
    }

    #[test]
    fn test_emit_to_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = emit(&[], Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::Output { .. }));
    }
}
