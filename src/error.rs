//! Error taxonomy for engine setup.
//!
//! Nothing in the per-tick path returns an error; these cover configuration
//! validation and the one-time asset/audio loading done before the loop.

/// Convenience result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Parameter out of its documented range.
    #[error("invalid config: {0}")]
    Config(String),

    /// Mesh or image could not be decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Audio clip could not be read or analysed.
    #[error("audio error: {0}")]
    Audio(String),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }
}
