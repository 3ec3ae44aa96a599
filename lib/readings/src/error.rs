use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Csv(err) => write!(f, "csv error: {err}"),
            Self::Xlsx(err) => write!(f, "xlsx error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
