//! Runtime error types.

use thiserror::Error;

use kryo_lower::LowerError;
use kryo_parser::Diagnostic;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("instance registry full (at most {0} concurrent instances)")]
    InstanceLimitExceeded(usize),

    #[error("no instance registered with id {0:?}")]
    InstanceNotFound(kryo_core::InstanceId),

    #[error("source failed to parse: {0:?}")]
    ParseFailed(Vec<Diagnostic>),

    #[error("lowering failed: {0}")]
    LowerFailed(#[from] LowerError),

    #[error("reload vetoed by instance callback")]
    ReloadVetoed,

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to read reload source: {0}")]
    ReloadIoFailed(#[from] std::io::Error),
}

pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
