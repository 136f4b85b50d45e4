//! Document output
//!
//! An exported document is written in one piece: either all of it reaches
//! its destination or none of it does.

use crate::domain::{PunktError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a document to a file atomically
///
/// The text goes to a temporary sibling file which is then renamed over
/// `path`, so readers never observe a partially written document.
pub fn write_document(path: &Path, text: &str, trailing_newline: bool) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| PunktError::Io(format!("Invalid output path: {}", path.display())))?;

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(text.as_bytes())?;
        if trailing_newline {
            file.write_all(b"\n")?;
        }
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(PunktError::Io(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    tracing::debug!(path = %path.display(), bytes = text.len(), "Document written");
    Ok(())
}

/// Write a document to a stream in a single call
pub fn write_to<W: Write>(mut writer: W, text: &str, trailing_newline: bool) -> Result<()> {
    let mut buf = String::with_capacity(text.len() + 1);
    buf.push_str(text);
    if trailing_newline {
        buf.push('\n');
    }
    writer.write_all(buf.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_document_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("russian.json");

        write_document(&path, "{}", true).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(!dir.path().join("russian.json.tmp").exists());
    }

    #[test]
    fn test_write_document_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("english.json");
        fs::write(&path, "old").unwrap();

        write_document(&path, "new", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_document_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_document(&path, "{}", true).unwrap_err();
        assert!(matches!(err, PunktError::Io(_)));
    }

    #[test]
    fn test_write_to_stream() {
        let mut out = Vec::new();
        write_to(&mut out, "{}", true).unwrap();
        assert_eq!(out, b"{}\n");

        let mut out = Vec::new();
        write_to(&mut out, "{}", false).unwrap();
        assert_eq!(out, b"{}");
    }
}
