//! Output formatting and writing of rewritten collision files

use crate::tri::LineKind;
use colcrate_core::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One indentation unit
pub const INDENT: &str = "\t";

/// Suffix appended to the input path to name the output file
pub const DEFAULT_SUFFIX: &str = ".new";

/// Indent a line by its kind: collision-type markers once, triangles twice.
pub fn format_line(line: &str) -> String {
    let line = line.trim();
    match LineKind::of(line) {
        LineKind::CollisionType => format!("{INDENT}{line}"),
        LineKind::Triangle => format!("{INDENT}{INDENT}{line}"),
        LineKind::Other => line.to_string(),
    }
}

/// Sibling output path: the input path with `suffix` appended.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Render every line with its indentation, one per line.
pub fn render<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format_line(line.as_ref()));
        out.push('\n');
    }
    out
}

/// Writes a line sequence to disk in one pass
pub struct FileRewriter;

impl FileRewriter {
    /// Write `lines` to `path`, replacing any existing file.
    pub fn write<S: AsRef<str>, P: AsRef<Path>>(lines: &[S], path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", format_line(line.as_ref())).map_err(|e| Error::io(path, e))?;
        }
        writer.flush().map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), lines = lines.len(), "collision file written");
        Ok(())
    }

    /// Write next to `input` using `suffix`, never touching `input` itself.
    pub fn write_sibling<S: AsRef<str>>(lines: &[S], input: &Path, suffix: &str) -> Result<PathBuf> {
        if suffix.is_empty() {
            return Err(Error::Config(
                "output suffix must not be empty; the input would be overwritten".to_string(),
            ));
        }
        let path = output_path(input, suffix);
        Self::write(lines, &path)?;
        Ok(path)
    }
}
