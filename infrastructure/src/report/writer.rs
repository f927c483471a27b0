//! Markdown report persistence

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Writes research reports to disk.
pub struct ReportWriter;

impl ReportWriter {
    /// Write `markdown` to `path`, creating parent directories, and return
    /// the absolute path written.
    pub async fn write(path: &Path, markdown: &str) -> io::Result<PathBuf> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, markdown).await?;

        let written = fs::canonicalize(path).await?;
        info!(path = %written.display(), bytes = markdown.len(), "Report written");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("mcp.md");

        let written = ReportWriter::write(&path, "# Report\n").await.unwrap();

        assert!(written.is_absolute());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.md");

        ReportWriter::write(&path, "old").await.unwrap();
        ReportWriter::write(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
