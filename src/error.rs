//! Error types for driftfield.
//!
//! The simulation itself never fails. These cover the surfaces around it:
//! loading configuration, bringing up the GPU, and opening the window.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`ParticleConfig`](crate::ParticleConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid JSON for this config.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface ran out of memory while presenting a frame.
    #[error("GPU ran out of memory while rendering")]
    OutOfMemory,
}

/// Errors that can occur when running a [`Backdrop`](crate::Backdrop).
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Failed to create or run the event loop.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The configuration was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
