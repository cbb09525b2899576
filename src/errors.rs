use std::fmt;

/// An error that can occur when decoding or encoding save data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<usize> {
        self.0.offset()
    }

    /// Wraps a decoding failure from the body of a save file
    pub(crate) fn corrupt(cause: Error) -> Error {
        Error::new(ErrorKind::CorruptSaveFile(cause))
    }

    /// Returns true if the error originated from running out of input,
    /// even when wrapped as a corrupt save file.
    pub fn is_truncated(&self) -> bool {
        match *self.0 {
            ErrorKind::TruncatedInput { .. } => true,
            ErrorKind::CorruptSaveFile(ref cause) => cause.is_truncated(),
            _ => false,
        }
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// The buffer ended in the middle of a field
    TruncatedInput { offset: usize },

    /// A variant tag outside of the seven known kinds was encountered
    UnknownVariantTag { tag: u64, offset: usize },

    /// A varint does not fit within 64 bits
    Overflow { offset: usize },

    /// The value can not be represented by any of the variant kinds
    UnsupportedValueType { message: String },

    /// The file does not start with the expected magic header
    WrongFormatVersion { found: Vec<u8> },

    /// The envelope body could not be decoded. Holds the original cause.
    CorruptSaveFile(Error),

    /// Containers were nested deeper than the configured limit
    NestingTooDeep { max_depth: usize, offset: usize },

    /// A string payload was not valid UTF-8
    InvalidUtf8 { offset: usize },

    /// A boolean payload was neither 0 nor 1
    InvalidBool { value: u8, offset: usize },

    /// A field that must exist in the entity tree is absent
    MissingField { path: String },

    /// An IO error while reading or writing a save file
    Io(std::io::Error),
}

impl ErrorKind {
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorKind::TruncatedInput { offset } => Some(offset),
            ErrorKind::UnknownVariantTag { offset, .. } => Some(offset),
            ErrorKind::Overflow { offset } => Some(offset),
            ErrorKind::NestingTooDeep { offset, .. } => Some(offset),
            ErrorKind::InvalidUtf8 { offset } => Some(offset),
            ErrorKind::InvalidBool { offset, .. } => Some(offset),
            ErrorKind::CorruptSaveFile(ref cause) => cause.offset(),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::CorruptSaveFile(ref err) => Some(err),
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::TruncatedInput { offset } => {
                write!(f, "unexpected end of input (offset: {})", offset)
            }
            ErrorKind::UnknownVariantTag { tag, offset } => write!(
                f,
                "unknown variant tag encountered (tag: {}, offset: {})",
                tag, offset
            ),
            ErrorKind::Overflow { offset } => {
                write!(f, "varint overflows 64 bits (offset: {})", offset)
            }
            ErrorKind::UnsupportedValueType { ref message } => {
                write!(f, "unsupported value type: {}", message)
            }
            ErrorKind::WrongFormatVersion { ref found } => write!(
                f,
                "wrong save format version: expected SBVJ01 but found {:?}",
                String::from_utf8_lossy(found)
            ),
            ErrorKind::CorruptSaveFile(ref err) => write!(f, "save file is corrupt: {}", err),
            ErrorKind::NestingTooDeep { max_depth, offset } => write!(
                f,
                "variants nested deeper than {} levels (offset: {})",
                max_depth, offset
            ),
            ErrorKind::InvalidUtf8 { offset } => {
                write!(f, "string is not valid utf-8 (offset: {})", offset)
            }
            ErrorKind::InvalidBool { value, offset } => write!(
                f,
                "expected boolean byte of 0 or 1 but found {} (offset: {})",
                value, offset
            ),
            ErrorKind::MissingField { ref path } => write!(f, "missing field: {}", path),
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}

/// A failure while reading a field, before the position is known.
///
/// Low level readers operate on slices and don't track where the slice
/// begins, so callers attach the offset with [`ReadError::at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadError {
    Eof,
    Overflow,
    InvalidUtf8,
    InvalidBool(u8),
    UnknownTag(u64),
}

impl ReadError {
    #[inline]
    #[must_use]
    pub(crate) fn at(self, offset: usize) -> Error {
        let kind = match self {
            ReadError::Eof => ErrorKind::TruncatedInput { offset },
            ReadError::Overflow => ErrorKind::Overflow { offset },
            ReadError::InvalidUtf8 => ErrorKind::InvalidUtf8 { offset },
            ReadError::InvalidBool(value) => ErrorKind::InvalidBool { value, offset },
            ReadError::UnknownTag(tag) => ErrorKind::UnknownVariantTag { tag, offset },
        };
        Error::new(kind)
    }
}
