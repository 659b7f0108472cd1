use core::fmt;

/// Result alias for `nestcloud`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by generation, dataset assembly, and clustering.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty or malformed.
    InvalidInput(String),

    /// Input cannot produce a valid merge tree.
    DegenerateInput {
        /// Number of rows supplied.
        n_rows: usize,
        /// What made the input degenerate.
        reason: &'static str,
    },

    /// A parameter value or combination cannot be honoured.
    Configuration {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// Parallel sequences disagree in length.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },
}

impl Error {
    pub(crate) fn configuration(name: &'static str, message: impl Into<String>) -> Self {
        Error::Configuration {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::DegenerateInput { n_rows, reason } => {
                write!(f, "degenerate input ({n_rows} rows): {reason}")
            }
            Error::Configuration { name, message } => {
                write!(f, "invalid configuration '{name}': {message}")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for Error {}
