//! Error types for the Evergreen viewer

use thiserror::Error;

/// Errors surfaced by the viewer library
#[derive(Debug, Error)]
pub enum EvergreenError {
    /// Configuration could not be merged or deserialized
    #[error("config error: {0}")]
    Config(#[from] figment::Error),

    /// Font file could not be read
    #[error("failed to read font '{path}': {source}")]
    FontIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Font bytes were read but could not be parsed
    #[error("failed to parse font '{path}': {reason}")]
    FontParse { path: String, reason: String },

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
}

pub type Result<T> = std::result::Result<T, EvergreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_errors_name_the_path() {
        let err = EvergreenError::FontParse {
            path: "fonts/missing.ttf".to_string(),
            reason: "bad magic".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fonts/missing.ttf"));
        assert!(message.contains("bad magic"));
    }

    #[test]
    fn font_io_error_keeps_source() {
        use std::error::Error as _;

        let err = EvergreenError::FontIo {
            path: "x.ttf".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }
}
