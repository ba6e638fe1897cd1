// Application-level error type.
// Only startup can fail; everything the visitor triggers degrades silently.

use std::fmt;

#[derive(Debug)]
pub enum PortfolioError {
    /// Event loop or window creation failed.
    Window(String),
    /// No usable GPU adapter, device or surface.
    Gpu(String),
    /// Config file could not be parsed or serialized.
    Config(String),
    Io(std::io::Error),
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(msg) => write!(f, "window error: {msg}"),
            Self::Gpu(msg) => write!(f, "GPU error: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for PortfolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<winit::error::EventLoopError> for PortfolioError {
    fn from(e: winit::error::EventLoopError) -> Self {
        Self::Window(e.to_string())
    }
}

impl From<winit::error::OsError> for PortfolioError {
    fn from(e: winit::error::OsError) -> Self {
        Self::Window(e.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for PortfolioError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        Self::Gpu(e.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for PortfolioError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        Self::Gpu(e.to_string())
    }
}
