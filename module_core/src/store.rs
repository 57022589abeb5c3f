use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a [`FileStore`].
///
/// The error is `Clone` so that a single failed fetch can be handed to every
/// caller that waits for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No file with the given identifier exists.
    #[error("file \"{0}\" not found")]
    NotFound(String),

    /// The identifier or file name is not acceptable for the store.
    #[error("invalid file name \"{0}\"")]
    InvalidName(String),

    /// The file content was rejected or could not be decoded.
    #[error("invalid file content: {0}")]
    InvalidData(String),

    /// A local I/O operation failed.
    #[error("I/O error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },

    /// A request to a remote store failed.
    #[error("request failed (status {status:?}): {message}")]
    Http {
        status: Option<u16>,
        message: String,
    },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Common interface of the store the GPX files are uploaded to.
///
/// A file is identified by its file name. Every identifier returned by
/// [`FileStore::list`] can be passed to [`FileStore::fetch`] and
/// [`FileStore::delete`].
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Returns the identifiers of all available files in a stable order.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Stores `bytes` as `filename` and returns the identifier of the new file.
    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StoreError>;

    /// Returns the raw text of the file.
    async fn fetch(&self, id: &str) -> Result<String, StoreError>;

    /// Deletes the file.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
