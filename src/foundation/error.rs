/// Convenience result type used across the crate.
pub type Dave2dResult<T> = Result<T, Dave2dError>;

/// Result type returned by [`GpuDevice`](crate::GpuDevice) calls.
pub type DriverResult<T> = Result<T, DriverError>;

/// Status codes reported by the 2D GPU driver.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The driver could not allocate memory for the request.
    #[error("driver out of memory")]
    NoMemory,

    /// The device handle is not open or was already closed.
    #[error("invalid device handle")]
    InvalidDevice,

    /// A render buffer id does not belong to this device.
    #[error("invalid render buffer {0}")]
    InvalidRenderBuffer(u32),

    /// A parameter was outside the range accepted by the hardware.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other non-success status code.
    #[error("driver status {0}")]
    Status(i32),
}

/// Top-level error taxonomy used by the draw unit.
#[derive(thiserror::Error, Debug)]
pub enum Dave2dError {
    /// A unit is already bound to this device index.
    #[error("already initialized: device {0} is owned by another unit")]
    AlreadyInitialized(u32),

    /// One-time device bring-up failed.
    #[error("device init error ({stage}): {source}")]
    DeviceInit {
        /// Bring-up step that failed.
        stage: &'static str,
        /// Driver status returned by that step.
        #[source]
        source: DriverError,
    },

    /// Invalid unit configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The render worker could not be started.
    #[error("worker error: {0}")]
    Worker(String),

    /// A driver call failed outside of initialization.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Dave2dError {
    /// Build a [`Dave2dError::DeviceInit`] value.
    pub fn device_init(stage: &'static str, source: DriverError) -> Self {
        Self::DeviceInit { stage, source }
    }

    /// Build a [`Dave2dError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`Dave2dError::Worker`] value.
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }

    /// Returns `true` for errors that can only come out of unit initialization and have no
    /// recovery path.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AlreadyInitialized(_)
                | Self::DeviceInit { .. }
                | Self::Config(_)
                | Self::Worker(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
