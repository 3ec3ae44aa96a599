use std::fmt;

#[derive(Debug)]
pub enum Error {
    Store(readings::Error),
    Io(std::io::Error),
}

impl From<readings::Error> for Error {
    fn from(err: readings::Error) -> Self {
        Self::Store(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "store error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
