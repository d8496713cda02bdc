use crate::errors::OknaError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid number: '{input}'")]
    InvalidNumber { input: String },

    #[error(
        "Invalid coordinate format: '{input}'. Expected 'X=<int>, Y=<int>, Width=<int>, Height=<int>'"
    )]
    InvalidCoordinateFormat { input: String },
}

impl OknaError for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            ParseError::InvalidNumber { .. } => "INPUT_INVALID_NUMBER",
            ParseError::InvalidCoordinateFormat { .. } => "INPUT_INVALID_COORDINATES",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
