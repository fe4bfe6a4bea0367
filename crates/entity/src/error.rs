use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EntityError {
    /// A unhandled database error occurred.
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    /// A unexpected error occured.
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
    /// Forbidden because of missing session.
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
    /// not found by id.
    #[error("the resource {0} with id '{1}' was not found")]
    NotFoundById(String, String),
    /// not found by field.
    #[error("the resource {0} with {1} '{2}' was not found")]
    NotFoundByField(String, String, String),
    /// bad request.
    #[error("{1}")]
    BadRequest(String, String),
}

pub type EntityResult<T> = Result<T, EntityError>;

impl EntityError {
    pub fn not_found_by_id<T>(id: impl Into<String>) -> Self {
        Self::NotFoundById(tynm::type_name::<T>(), id.into())
    }

    pub fn not_found_by_field<T>(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotFoundByField(tynm::type_name::<T>(), field.into(), value.into())
    }

    pub fn bad_request(err_type: impl Into<String>, err_msg: impl Into<String>) -> Self {
        Self::BadRequest(err_type.into(), err_msg.into())
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl ErrorExtensions for EntityError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(format!("{}", self)).extend_with(|_err, e| match self {
            EntityError::Forbidden => e.set("code", 403),
            EntityError::Internal => e.set("code", 500),
            EntityError::NotFoundById(ty, _) | EntityError::NotFoundByField(ty, _, _) => {
                e.set("code", 404);
                e.set("type", ty.as_str());
            }
            EntityError::BadRequest(ty, _) => {
                e.set("code", 400);
                e.set("details", ty.as_str());
            }
            _ => {}
        })
    }
}
