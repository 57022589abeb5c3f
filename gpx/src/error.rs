use thiserror::Error;

/// Errors that can occur while reading a GPX document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpxError {
    /// The text is not well-formed XML.
    #[error("malformed GPX document: {0}")]
    Malformed(String),

    /// The document is well-formed but its root element is not `gpx`.
    #[error("not a GPX document, root element is \"{0}\"")]
    NotGpx(String),

    /// The document does not contain a single usable track point.
    #[error("no track points found in the GPX document")]
    NoTrackPoints,
}
