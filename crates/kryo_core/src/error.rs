//! IR-core error types.

use thiserror::Error;

use crate::ids::ComponentId;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("component pool exhausted")]
    PoolExhausted,

    #[error("component {0} not found in context")]
    NotFound(ComponentId),

    #[error("node handle does not resolve to a live component")]
    InvalidHandle,

    #[error("index {index} out of range for {count} children")]
    ChildIndexOutOfRange { index: usize, count: usize },

    #[error("heading level {0} out of range [1, 6]")]
    InvalidHeadingLevel(u8),

    #[error("tab index {index} out of range for {count} tabs")]
    TabIndexOutOfRange { index: usize, count: usize },

    #[error("component {0} has no custom data of the expected variant")]
    CustomDataMismatch(ComponentId),
}

pub type IrResult<T> = std::result::Result<T, IrError>;
