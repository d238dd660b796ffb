use thiserror::Error;

/// Typed failures raised by the domain services.
///
/// Lookup misses are not errors: `get_by_id` returns `None` and
/// `update`/`delete` return `false` for an unknown id. Only invalid
/// input, broken references and store failures surface as errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad numeric/range/enum input, rejected before touching the store.
    #[error("{0}")]
    InvalidArgument(String),

    /// A required related entity does not exist.
    #[error("{entity} '{id}' was not found")]
    ReferenceNotFound { entity: &'static str, id: i32 },

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn reference(entity: &'static str, id: i32) -> Self {
        Self::ReferenceNotFound { entity, id }
    }
}
