use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidIdentifier { field: &'static str, input: String },
    InvalidTimestamp { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidIdentifier { field, input } => {
                write!(f, "{field} contains a reserved URL character: {input}")
            }
            Self::InvalidTimestamp { input } => write!(f, "unrecognised timestamp: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
