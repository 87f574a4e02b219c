use std::{
    io,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}

/// A directory on local disk whose contents are served under a public URL
/// prefix. Stored files are addressed by paths relative to `root`.
#[derive(Debug, Clone)]
pub struct PublicDisk {
    root: PathBuf,
    public_url: String,
}

impl PublicDisk {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        let public_url = public_url.into();
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn public_url(&self) -> &str { &self.public_url }

    /// Writes `bytes` to `<dir>/<uuid>.<ext>` and returns the relative path.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn store(
        &self, dir: &str, extension: &str, bytes: &[u8],
    ) -> Result<String, StorageError> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        let relative = format!("{dir}/{}.{extension}", Uuid::now_v7());
        let target = self.resolve(&relative)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;

        debug!(path = %relative, "Stored file");
        Ok(relative)
    }

    pub async fn exists(&self, relative: &str) -> Result<bool, StorageError> {
        let target = self.resolve(relative)?;
        Ok(tokio::fs::try_exists(target).await?)
    }

    /// Removes a stored file. A missing file is not an error; the return
    /// value says whether anything was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, relative: &str) -> Result<bool, StorageError> {
        let target = self.resolve(relative)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = relative, "File already absent");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn url(&self, relative: &str) -> String {
        format!("{}/{}", self.public_url, relative.trim_start_matches('/'))
    }

    /// Maps a relative path onto the disk root, refusing anything that
    /// could escape it.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(relative);
        let escapes = relative.is_empty()
            || path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));

        if escapes {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk() -> (tempfile::TempDir, PublicDisk) {
        let dir = tempfile::tempdir().unwrap();
        let disk = PublicDisk::new(dir.path(), "/storage/");
        (dir, disk)
    }

    #[tokio::test]
    async fn test_store_then_delete() {
        let (_dir, disk) = disk();

        let path = disk.store("events", "PNG", b"png-bytes").await.unwrap();
        assert!(path.starts_with("events/"));
        assert!(path.ends_with(".png"));
        assert!(disk.exists(&path).await.unwrap());

        assert!(disk.delete(&path).await.unwrap());
        assert!(!disk.exists(&path).await.unwrap());
        assert!(!disk.delete(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_stored_names_are_unique() {
        let (_dir, disk) = disk();

        let a = disk.store("events", "jpg", b"a").await.unwrap();
        let b = disk.store("events", "jpg", b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_url_joins_prefix() {
        let disk = PublicDisk::new("/tmp", "/storage/");
        assert_eq!(disk.url("events/a.gif"), "/storage/events/a.gif");
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let disk = PublicDisk::new("/srv/public", "/storage");

        assert!(disk.resolve("../etc/passwd").is_err());
        assert!(disk.resolve("/etc/passwd").is_err());
        assert!(disk.resolve("events/./a.png").is_ok());
        assert!(disk.resolve("").is_err());
        assert_eq!(
            disk.resolve("events/a.png").unwrap(),
            PathBuf::from("/srv/public/events/a.png")
        );
    }
}
