use axerrno::AxError;
use thiserror::Error;

/// Errors returned by line, interrupt and initialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GpioError {
    /// The line belongs to an unimplemented port or a missing pin.
    #[error("line does not exist")]
    InvalidLine,
    /// The line exists but another access domain owns it.
    #[error("line is owned by another access domain")]
    Inaccessible,
    /// A request was made for a line this domain may not own.
    #[error("line is busy")]
    Busy,
    #[error("unsupported interrupt trigger type")]
    UnsupportedTriggerType,
    #[error("argument out of range")]
    InvalidArgument,
    #[error("line has no wake source")]
    NoWakeSource,
    /// A memory or interrupt resource was absent from the platform descriptor.
    #[error("platform resource missing")]
    ResourceMissing,
    /// Pin control or the power-management controller refused the request.
    #[error("collaborator failed: {0:?}")]
    CollaboratorFailure(AxError),
}

pub type GpioResult<T = ()> = Result<T, GpioError>;

impl From<GpioError> for AxError {
    fn from(err: GpioError) -> Self {
        match err {
            GpioError::InvalidLine | GpioError::InvalidArgument => AxError::InvalidInput,
            GpioError::Inaccessible => AxError::PermissionDenied,
            GpioError::Busy => AxError::ResourceBusy,
            GpioError::UnsupportedTriggerType => AxError::Unsupported,
            GpioError::NoWakeSource | GpioError::ResourceMissing => AxError::NotFound,
            GpioError::CollaboratorFailure(e) => e,
        }
    }
}
