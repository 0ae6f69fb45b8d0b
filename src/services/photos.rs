//! Photo storage on the local filesystem

use std::path::Path;

use crate::error::AppResult;

/// Owner of an uploaded photo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOwner {
    Author,
    Book,
}

/// Writes uploaded photos under a root directory.
///
/// Paths are deterministic: `{root}/{id}/fullsize.jpg` for authors and
/// `{root}/books/{id}/fullsize.jpg` for books. A new upload replaces the
/// previous file.
#[derive(Debug, Clone)]
pub struct PhotoStorage {
    root: String,
}

impl PhotoStorage {
    pub fn new(root: impl Into<String>) -> Self {
        let root: String = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// Path recorded in the owner's `photo` column
    pub fn path_for(&self, owner: PhotoOwner, id: i32) -> String {
        match owner {
            PhotoOwner::Author => format!("{}/{}/fullsize.jpg", self.root, id),
            PhotoOwner::Book => format!("{}/books/{}/fullsize.jpg", self.root, id),
        }
    }

    /// Write `content` to `path`, creating parent directories
    pub async fn save(&self, path: &str, content: &[u8]) -> AppResult<()> {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;

        tracing::debug!("Stored {} bytes at {}", content.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let storage = PhotoStorage::new("./upload");
        assert_eq!(storage.path_for(PhotoOwner::Author, 1), "./upload/1/fullsize.jpg");
        assert_eq!(storage.path_for(PhotoOwner::Book, 1), "./upload/books/1/fullsize.jpg");

        let storage = PhotoStorage::new("/var/lib/library/");
        assert_eq!(
            storage.path_for(PhotoOwner::Book, 42),
            "/var/lib/library/books/42/fullsize.jpg"
        );
    }

    #[tokio::test]
    async fn test_save_creates_directories() {
        let root = std::env::temp_dir().join(format!("library-photos-{}", std::process::id()));
        let storage = PhotoStorage::new(root.to_string_lossy());
        let path = storage.path_for(PhotoOwner::Book, 9);

        storage.save(&path, b"test image content").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"test image content");

        storage.save(&path, b"replaced").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"replaced");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
