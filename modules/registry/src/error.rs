use common::{category::CategoryError, color::ColorError};
use gpx::GpxError;
use module_core::StoreError;
use thiserror::Error;

/// Errors reported by the operations of a [`crate::TrackRegistry`].
///
/// Every failed operation leaves the registry in the state it had before the
/// operation was issued.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The file could not be fetched from the file store.
    #[error("failed to fetch \"{id}\": {source}")]
    Fetch { id: String, source: StoreError },

    /// The file is not a readable GPX document.
    #[error("failed to parse \"{id}\": {source}")]
    Parse { id: String, source: GpxError },

    /// The file was parsed but contains no usable track point.
    #[error("track \"{0}\" has no track points")]
    EmptyTrack(String),

    /// The file store refused to delete the file.
    #[error("failed to delete \"{id}\": {source}")]
    Delete { id: String, source: StoreError },

    /// The file store refused the upload.
    #[error("failed to upload \"{filename}\": {source}")]
    Upload {
        filename: String,
        source: StoreError,
    },

    /// The list of available files could not be read.
    #[error("failed to list files: {0}")]
    List(#[source] StoreError),

    #[error(transparent)]
    InvalidCategory(#[from] CategoryError),

    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    /// The load was overtaken by an unload of the same id and its result was discarded.
    #[error("load of \"{0}\" was superseded")]
    Superseded(String),
}
