//! Crate-level error types.

use std::{fmt, path::PathBuf};

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the glearn crate.
#[derive(Debug)]
pub enum GlearnError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A shader could not be read or failed to compose/validate.
    Shader {
        /// Shader file name or path the source came from.
        path: String,
        /// Compiler or I/O diagnostic.
        message: String,
    },
    /// An image file could not be decoded into a texture.
    Texture {
        /// Path of the image file.
        path: PathBuf,
        /// Decoder diagnostic.
        message: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop or window failure.
    Viewer(String),
}

impl fmt::Display for GlearnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader { path, message } => {
                write!(f, "shader '{path}' failed: {message}")
            }
            Self::Texture { path, message } => {
                write!(f, "texture '{}' failed to load: {message}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GlearnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GlearnError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GlearnError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_error_names_the_file() {
        let err = GlearnError::Shader {
            path: "lighting.wgsl".into(),
            message: "expected ';'".into(),
        };
        let text = err.to_string();
        assert!(text.contains("lighting.wgsl"));
        assert!(text.contains("expected ';'"));
    }

    #[test]
    fn io_error_exposes_source() {
        let err: GlearnError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(GlearnError::Viewer("x".into()).source().is_none());
    }
}
