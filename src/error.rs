//! Crate-level error types.

use std::fmt;

use crate::gpu::{
    render_context::RenderContextError, shader_injection::InjectionError,
};

/// Errors produced by the car-lights crate.
#[derive(Debug)]
pub enum CarLightsError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Shader source preprocessing failed before composition.
    Injection(InjectionError),
    /// naga-oil rejected a shader during composition.
    ShaderCompose(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for CarLightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Injection(e) => write!(f, "shader injection error: {e}"),
            Self::ShaderCompose(msg) => {
                write!(f, "shader composition error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for CarLightsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Injection(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CarLightsError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<InjectionError> for CarLightsError {
    fn from(e: InjectionError) -> Self {
        Self::Injection(e)
    }
}

impl From<std::io::Error> for CarLightsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
