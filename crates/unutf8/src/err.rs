//! Helper module with this crate's error type.
//!
//! Decoding errors complement I/O errors by distinguishing failures of the
//! code point table from failures of the byte stream under inspection. They
//! seamlessly convert to and from I/O errors. Note that malformed input
//! bytes are *not* errors: the decoder reports them in-band as
//! [`Event`](crate::Event)s.

/// The enumeration of error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A code point table without a single entry.
    EmptyTable,
    /// An error reading the code point table.
    Unloadable,
    /// An error reading the byte stream under inspection.
    Unreadable,
    /// An error writing a resolved name or diagnostic.
    Unwritable,
}

impl ErrorKind {
    /// Turn the error kind to an error message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyTable => "code point table has no entries",
            Self::Unloadable => "error reading code point table",
            Self::Unreadable => "error reading input stream",
            Self::Unwritable => "error writing decoding report",
        }
    }
}

impl From<ErrorKind> for std::io::Error {
    fn from(value: ErrorKind) -> Self {
        Error::from(value).into()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind, source: None }
    }
}

/// A decoding run error.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<std::io::Error>,
}

impl Error {
    /// Create a new unloadable error.
    pub fn unloadable(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Unloadable,
            source: Some(source),
        }
    }

    /// Create a new unreadable error.
    pub fn unreadable(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Unreadable,
            source: Some(source),
        }
    }

    /// Create a new unwritable error.
    pub fn unwritable(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Unwritable,
            source: Some(source),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.as_str())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(error) => Some(error),
            None => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::unreadable(value)
    }
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        use self::ErrorKind::*;

        match value.kind {
            EmptyTable => Self::new(std::io::ErrorKind::InvalidData, value),
            Unloadable | Unreadable | Unwritable => {
                if let Some(error) = value.source {
                    error
                } else {
                    Self::new(std::io::ErrorKind::Other, value)
                }
            }
        }
    }
}

/// Report the error, including any sources.
pub fn report(error: &dyn std::error::Error) {
    eprintln!("ERROR: {}", error);

    let mut error = error;
    while let Some(inner) = error.source() {
        eprintln!("    {}", inner);
        error = inner;
    }
}
