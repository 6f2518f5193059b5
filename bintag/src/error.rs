use std::fmt::{Display, Formatter, self};

/// A `DecodeError` annotated with the input position at which decoding failed.
#[derive(Debug, PartialEq)]
pub struct DecoderError {
    inner: DecodeError,
    at: usize,
}

impl DecoderError {
    pub fn into_inner(self) -> DecodeError {
        self.inner
    }
}

impl std::error::Error for DecoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
       Some(&self.inner)
    }
}

impl Display for DecoderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} at input position {}", self.inner, self.at)
    }
}

#[derive(Debug, PartialEq)]
pub enum DecodeError {
    /// The buffer ended before a scalar value could be completed. Array and
    /// span decoders clip instead of raising this.
    Eof,
    Utf8(std::str::Utf8Error),
    /// A varint magnitude exceeded 64 bits.
    Overflow,
}

impl DecodeError {
    pub fn at(self, at: usize) -> DecoderError {
        DecoderError { inner: self, at }
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(e: std::str::Utf8Error) -> DecodeError {
        DecodeError::Utf8(e)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Utf8(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DecodeError::Eof => f.write_str("Unexpected end of buffer while decoding"),
            DecodeError::Utf8(e) => write!(f, "String slice was not valid Utf-8: {}", e),
            DecodeError::Overflow => f.write_str("Varint magnitude exceeds 64 bits"),
        }
    }
}

#[derive(Debug)]
pub enum EncodeError {
    Io(std::io::Error),
    /// The value variant does not match the tag it was packed under.
    Type { expected: &'static str, found: &'static str },
    /// `write_to` was handed a slice too small for the encoded fragment.
    Space { need: usize, have: usize },
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> EncodeError {
        EncodeError::Io(e)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            EncodeError::Io(e) => write!(f, "IO error {}", e),
            EncodeError::Type { expected, found } => write!(f, "Tag expects a {} value but was given a {}", expected, found),
            EncodeError::Space { need, have } => write!(f, "Fragment of {} bytes does not fit into {} remaining bytes", need, have),
        }
    }
}

/// Raised when a type tag string cannot be parsed into a [Tag](crate::Tag).
#[derive(Debug, PartialEq)]
pub enum TagError {
    Unknown(String),
    /// Integer tags support widths 1, 2 and 4; float tags support 4 and 8.
    Width { kind: char, size: u8 },
}

impl std::error::Error for TagError {}

impl Display for TagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TagError::Unknown(tag) => write!(f, "Unrecognized type tag `{}`", tag),
            TagError::Width { kind, size } => write!(f, "Unsupported width {} for numeric kind `{}`", size, kind),
        }
    }
}
