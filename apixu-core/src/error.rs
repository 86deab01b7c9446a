use thiserror::Error;

use crate::{api::ApiError, serializer::SerializerError};

pub type Result<T> = std::result::Result<T, ApixuError>;

/// Errors returned by the [`Apixu`](crate::Apixu) facade.
///
/// `InvalidQuery` is raised locally before any request is sent. The other two
/// variants carry the collaborator's error as-is.
#[derive(Debug, Error)]
pub enum ApixuError {
    #[error("{0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Serializer(#[from] SerializerError),
}

impl ApixuError {
    pub fn invalid_query<S: Into<String>>(message: S) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// True when the caller can fix the failure by correcting its input.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}
