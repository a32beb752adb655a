use std::path::PathBuf;

/// Convenience result type used across the render manager.
pub type RenderManagerResult<T> = Result<T, RenderManagerError>;

/// Top-level error taxonomy used by library APIs.
///
/// Recoverable build conditions (missing sockets, unknown engines) are not represented here; they
/// surface as [`crate::BuildWarning`] values in a [`crate::BuildReport`].
#[derive(thiserror::Error, Debug)]
pub enum RenderManagerError {
    /// The document has never been saved, so output paths cannot be resolved.
    #[error("document not persisted: {0}")]
    DocumentNotPersisted(String),

    /// Paste was requested before any copy.
    #[error("clipboard is empty: {0}")]
    EmptyClipboard(String),

    /// A view-layer lifecycle operation would break a scene invariant.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem errors while preparing output directories.
    #[error("io error at '{path}': {source}")]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderManagerError {
    /// Build a [`RenderManagerError::DocumentNotPersisted`] value.
    pub fn not_persisted(msg: impl Into<String>) -> Self {
        Self::DocumentNotPersisted(msg.into())
    }

    /// Build a [`RenderManagerError::EmptyClipboard`] value.
    pub fn empty_clipboard(msg: impl Into<String>) -> Self {
        Self::EmptyClipboard(msg.into())
    }

    /// Build a [`RenderManagerError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`RenderManagerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RenderManagerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`RenderManagerError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
