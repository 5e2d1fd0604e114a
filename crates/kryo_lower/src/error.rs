//! Lowering error type (§7).

use kryo_core::IrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LowerError {
    #[error("ir error: {0}")]
    Ir(#[from] IrError),
    #[error("pool exhausted while lowering component '{0}'")]
    ComponentAllocFailed(String),
}

pub type LowerResult<T> = Result<T, LowerError>;
