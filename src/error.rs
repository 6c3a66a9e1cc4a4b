//! Error taxonomy shared by the core and the CLI host.

/// Failure of one `generate` request. Nothing is rendered when any of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("generator for `{0}` not implemented yet")]
    UnsupportedTarget(String),

    #[error("JSON nesting exceeds the maximum supported depth of {max}")]
    DepthExceeded { max: usize },

    #[error("invalid options for {target}: {message}")]
    Options { target: String, message: String },
}

/// Root type name rejected by [`crate::naming::validate_type_name`].
///
/// Variants mirror the rule order: emptiness, leading digit, character set, reserved word.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Type name cannot be empty")]
    Empty,

    #[error("Type name cannot start with a number")]
    LeadingDigit,

    #[error("Type name can only contain letters, numbers, and underscores")]
    InvalidCharacters,

    #[error("\"{0}\" is a reserved word in some languages")]
    Reserved(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
