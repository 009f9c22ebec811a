//! Error types
//!
//! Everything here is a startup failure: once the window, GPU and audio
//! device are acquired the frame loop has no fallible operations.

use thiserror::Error;

/// A configuration value that violates a startup invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("fixed step must be positive and finite, got {0}")]
    NonPositiveStep(f32),
    #[error("slow-motion factor must be positive and finite, got {0}")]
    NonPositiveSlowFactor(f32),
    #[error("pixels-per-meter scale must be positive, got ({0}, {1})")]
    NonPositiveScale(f32, f32),
    #[error("sound cue list must contain at least one cue")]
    EmptyCueList,
}

/// Fatal startup error
#[derive(Debug, Error)]
pub enum PhysualError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("audio device unavailable: {0}")]
    AudioStream(#[from] rodio::StreamError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("graphics device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error("embedded font could not be parsed")]
    Font,
}
