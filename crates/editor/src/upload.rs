//! Local image files turned into inline overlay content.

use std::path::{Path, PathBuf};

use rtspio_core::data_uri;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },

    #[error("{} is not an image", path.display())]
    NotAnImage { path: PathBuf },
}

/// Read an image file and encode it as a `data:` URI.
///
/// The whole file is read before anything is persisted, so the stored
/// content never refers back to the local file system. Files whose bytes
/// and extension both fail to name an image format are rejected.
pub async fn read_as_data_uri(path: &Path) -> Result<String, UploadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(UploadError::Empty {
            path: path.to_path_buf(),
        });
    }
    let mime = data_uri::sniff_mime(&bytes, Some(path)).ok_or_else(|| UploadError::NotAnImage {
        path: path.to_path_buf(),
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), mime, "Encoded image file");
    Ok(data_uri::encode(&bytes, mime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_becomes_data_uri() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a\x01\x00\x01\x00").unwrap();

        let uri = read_as_data_uri(file.path()).await.unwrap();
        assert!(uri.starts_with("data:image/gif;base64,"));
        assert!(!uri.contains(&file.path().display().to_string()));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = read_as_data_uri(Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }

    #[tokio::test]
    async fn text_file_is_not_an_image() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "secret=hunter2").unwrap();

        let err = read_as_data_uri(file.path()).await.unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage { .. }));
    }

    #[tokio::test]
    async fn image_extension_is_enough() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"not yet a jpeg header").unwrap();

        let uri = read_as_data_uri(file.path()).await.unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = read_as_data_uri(file.path()).await.unwrap_err();
        assert!(matches!(err, UploadError::Empty { .. }));
    }
}
