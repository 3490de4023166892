use std::borrow::Cow;
use std::fmt;
use std::io;
use std::result;

use num_traits::ToPrimitive;

/// Errors which can happen when extracting metadata from a GIF file.
#[derive(Debug)]
pub enum Error {
    /// The stream does not carry a GIF signature.
    InvalidFormat(Cow<'static, str>),
    /// The stream ended before a fixed-size read could be completed.
    UnexpectedEndOfFile(Option<Cow<'static, str>>),
    /// Non-ASCII bytes were found where ASCII text is required.
    Encoding(Cow<'static, str>),
    /// The file could not be opened or its file system metadata queried.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidFormat(ref s) => write!(f, "invalid image format: {}", s),
            Error::UnexpectedEndOfFile(None) => write!(f, "unexpected end of file"),
            Error::UnexpectedEndOfFile(Some(ref s)) => {
                write!(f, "unexpected end of file: {}", s)
            }
            Error::Encoding(ref s) => write!(f, "invalid text encoding: {}", s),
            Error::Io(ref e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Logical screen dimensions of an image.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl<T: ToPrimitive, U: ToPrimitive> From<(T, U)> for Dimensions {
    fn from((w, h): (T, U)) -> Dimensions {
        Dimensions {
            width: w.to_u32().unwrap(),
            height: h.to_u32().unwrap(),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
