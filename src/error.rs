//! Error types for the pose visualization library.

use std::fmt;

/// Result type alias for pose visualization operations.
pub type Result<T> = std::result::Result<T, PoseVizError>;

/// Main error type for the pose visualization library.
#[derive(Debug)]
pub enum PoseVizError {
    /// Structurally invalid pose-sequence artifact (missing fields, length
    /// mismatches, out-of-range link indices). The message names the
    /// offending field or index.
    MalformedArtifact(String),
    /// Frame or person index outside the valid range for the loaded sequence.
    IndexOutOfRange(String),
    /// Artifact JSON could not be deserialized.
    Json(serde_json::Error),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Rasterization or image export error.
    ImageError(String),
    /// Window display error.
    VisualizerError(String),
}

impl fmt::Display for PoseVizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedArtifact(msg) => write!(f, "Malformed artifact: {msg}"),
            Self::IndexOutOfRange(msg) => write!(f, "Index out of range: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::VisualizerError(msg) => write!(f, "Visualizer error: {msg}"),
        }
    }
}

impl std::error::Error for PoseVizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PoseVizError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PoseVizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<image::ImageError> for PoseVizError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PoseVizError::MalformedArtifact("test".to_string());
        assert_eq!(err.to_string(), "Malformed artifact: test");

        let err = PoseVizError::IndexOutOfRange("test".to_string());
        assert_eq!(err.to_string(), "Index out of range: test");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PoseVizError = io.into();
        assert!(matches!(err, PoseVizError::Io(_)));
    }
}
