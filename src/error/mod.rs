use crate::compositor::CompositeError;
use crate::session::SessionError;
use crate::store::StoreError;
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Composite(#[from] CompositeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
