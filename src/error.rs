use crate::actlang::error::{CompileErr, DecodeErr};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    ConfigInvalidEnv(&'static str),
    FsErr(std::io::Error),
    Compile(CompileErr),
    Decode(DecodeErr),
    Report(serde_json::Error),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigInvalidEnv(name) => write!(f, "Environment variable {} is not valid unicode", name),
            Self::FsErr(e) => write!(f, "{}", e),
            Self::Compile(e) => write!(f, "{}", e),
            Self::Decode(e) => write!(f, "{}", e),
            Self::Report(e) => write!(f, "Unable to write report: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::FsErr(value)
    }
}

impl From<CompileErr> for Error {
    fn from(value: CompileErr) -> Self {
        Self::Compile(value)
    }
}

impl From<DecodeErr> for Error {
    fn from(value: DecodeErr) -> Self {
        Self::Decode(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Report(value)
    }
}

impl std::error::Error for Error {}
