//! Service error shared by all marina managers.

use crate::model::boat::{BoatId, BoatValidationError};
use crate::model::request::ValidationError;
use crate::model::slip::SlipId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MarinaResult<T> = Result<T, MarinaError>;

/// Coarse classification callers map to transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Forbidden,
    Internal,
}

/// Errors from marina service operations.
#[derive(Debug)]
pub enum MarinaError {
    /// Request input is missing or has the wrong shape.
    Validation(ValidationError),
    /// Boat id does not resolve.
    BoatNotFound(String),
    /// Slip id does not resolve.
    SlipNotFound(String),
    /// Dock attempted on a slip that already holds a boat.
    SlipOccupied(SlipId),
    /// Undock attempted on a vacant slip.
    SlipVacant(SlipId),
    /// Dock attempted with a boat that is already in a slip.
    BoatAlreadyDocked(BoatId),
    /// Storage failure.
    Repo(RepoError),
}

impl MarinaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::BoatNotFound(_) | Self::SlipNotFound(_) => ErrorKind::NotFound,
            Self::SlipOccupied(_) | Self::SlipVacant(_) | Self::BoatAlreadyDocked(_) => {
                ErrorKind::Forbidden
            }
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl Display for MarinaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BoatNotFound(id) => write!(f, "boat not found: {id}"),
            Self::SlipNotFound(id) => write!(f, "slip not found: {id}"),
            Self::SlipOccupied(id) => write!(f, "slip {id} is already occupied"),
            Self::SlipVacant(id) => write!(f, "slip {id} is empty"),
            Self::BoatAlreadyDocked(id) => write!(f, "boat {id} is already in a slip"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MarinaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MarinaError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::BoatNotFound(id) => Self::BoatNotFound(id.to_string()),
            RepoError::SlipNotFound(id) => Self::SlipNotFound(id.to_string()),
            RepoError::Validation(err) => Self::Validation(err.into()),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for MarinaError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BoatValidationError> for MarinaError {
    fn from(value: BoatValidationError) -> Self {
        Self::Validation(value.into())
    }
}
