//! Blob store for uploaded photos, backed by a local directory.

use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Creates `root` if needed and resolves it to an absolute path.
    pub async fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        fs::create_dir_all(root.as_ref()).await?;
        let root = fs::canonicalize(root.as_ref()).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` as `<unix-millis>-<original_name>` and returns the file's path.
    ///
    /// Only the final component of `original_name` is used. Two uploads of the
    /// same name within one millisecond collide; the second fails with
    /// `AlreadyExists` instead of overwriting the first.
    pub async fn store(&self, bytes: &[u8], original_name: &str) -> io::Result<String> {
        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            base_name(original_name)
        );
        let path = self.root.join(file_name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        Ok(path.to_string_lossy().into_owned())
    }

    pub async fn delete(&self, path: &str) -> io::Result<()> {
        fs::remove_file(path).await
    }
}

fn base_name(original_name: &str) -> &str {
    Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("foto")
}
