use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error(
        "index {index} is out of the snap point range, expected a value between -1 and {max}"
    )]
    IndexOutOfRange { index: i32, max: i32 },

    #[error("invalid snap point `{0}`, expected pixels, a percentage such as \"50%\", or \"content\"")]
    InvalidSnapPoint(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
