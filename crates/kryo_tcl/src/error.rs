//! Tcl/Tk adapter errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TclError {
    #[error("unterminated quoted string starting at command {0}")]
    UnterminatedString(usize),

    #[error("unterminated {{braced}} string starting at command {0}")]
    UnterminatedBrace(usize),

    #[error("widget-creation command with no path argument")]
    MissingWidgetPath,

    #[error("serialization failed: {0}")]
    Serde(#[from] kryo_serde::SerdeError),
}

pub type TclResult<T> = std::result::Result<T, TclError>;
