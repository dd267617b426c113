//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized Result type for Tsumugi.
pub type Result<T, E = TsumugiError> = std::result::Result<T, E>;

/// The error type for Tsumugi.
#[derive(Debug, thiserror::Error)]
pub enum TsumugiError {
    /// The error variant for [`DictionaryLoadError`].
    #[error(transparent)]
    DictionaryLoad(DictionaryLoadError),

    /// The error variant for [`InconsistentDictionaryError`].
    #[error(transparent)]
    InconsistentDictionary(InconsistentDictionaryError),

    /// The error variant for [`DisconnectedLatticeError`].
    #[error(transparent)]
    DisconnectedLattice(DisconnectedLatticeError),

    /// The error variant for [`NotFoundError`].
    #[error(transparent)]
    NotFound(NotFoundError),

    /// The error variant for [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`InvalidFormatError`].
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// The error variant for [`TryFromIntError`](std::num::TryFromIntError).
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// The error variant for [`ParseIntError`](std::num::ParseIntError).
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// The error variant for [`EncodeError`](bincode::error::EncodeError).
    #[error(transparent)]
    BincodeEncode(#[from] bincode::error::EncodeError),

    /// The error variant for [`std::io::Error`].
    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl TsumugiError {
    pub(crate) fn dictionary_load<S>(resource: &str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::DictionaryLoad(DictionaryLoadError {
            resource: resource.to_string(),
            msg: msg.into(),
        })
    }

    pub(crate) fn inconsistent_dictionary<S>(source: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InconsistentDictionary(InconsistentDictionaryError {
            source_name: source,
            msg: msg.into(),
        })
    }

    pub(crate) const fn disconnected_lattice(len_char: usize) -> Self {
        Self::DisconnectedLattice(DisconnectedLatticeError { len_char })
    }

    pub(crate) fn not_found<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::NotFound(NotFoundError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

impl From<bincode::error::DecodeError> for TsumugiError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DictionaryLoad(DictionaryLoadError {
            resource: "bincode".to_string(),
            msg: error.to_string(),
        })
    }
}

/// Error used when resource bytes are malformed or truncated.
#[derive(Debug)]
pub struct DictionaryLoadError {
    /// Logical name of the resource.
    pub(crate) resource: String,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for DictionaryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DictionaryLoadError: {}: {}", self.resource, self.msg)
    }
}

impl Error for DictionaryLoadError {}

/// Error used when an entry refers to a connection id outside the matrix.
#[derive(Debug)]
pub struct InconsistentDictionaryError {
    /// Name of the component holding the offending entry.
    pub(crate) source_name: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InconsistentDictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "InconsistentDictionaryError: {}: {}",
            self.source_name, self.msg
        )
    }
}

impl Error for InconsistentDictionaryError {}

/// Error used when the end of a sentence is unreachable in a lattice.
///
/// The unknown-word fallback always produces a candidate, so this indicates
/// a defect in dictionary construction.
#[derive(Debug)]
pub struct DisconnectedLatticeError {
    /// Number of characters of the sentence.
    pub(crate) len_char: usize,
}

impl fmt::Display for DisconnectedLatticeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DisconnectedLatticeError: EOS is unreachable in a sentence of {} characters",
            self.len_char
        )
    }
}

impl Error for DisconnectedLatticeError {}

/// Error used when an identifier does not refer to any entry.
#[derive(Debug)]
pub struct NotFoundError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NotFoundError: {}", self.msg)
    }
}

impl Error for NotFoundError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the input format is invalid.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Name of the format.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}
