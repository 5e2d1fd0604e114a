use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerdeError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("root component does not resolve to a live node")]
    InvalidRoot,
}

pub type SerdeResult<T> = std::result::Result<T, SerdeError>;
