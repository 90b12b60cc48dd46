use core::fmt;

use super::token::Category;

pub type Result<T> = core::result::Result<T, EncodeErr>;

/// Per-line errors. These are collected as diagnostics by the session and
/// never abort a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeErr {
    MalformedLine { line: String, reason: &'static str },
    UnknownToken { category: Option<Category>, name: String },
    InvalidValue { target: String, value: String, reason: String },
}

impl fmt::Display for EncodeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLine { line, reason } => {
                write!(f, "Malformed line \"{}\": {}", line, reason)
            }
            Self::UnknownToken { category: Some(category), name } => {
                write!(f, "Unknown token \"{}\" for {}", name, category)
            }
            Self::UnknownToken { category: None, name } => {
                write!(f, "Unknown target \"{}\"", name)
            }
            Self::InvalidValue { target, value, reason } => {
                write!(f, "Invalid value \"{}\" for {}: {}", value, target, reason)
            }
        }
    }
}

impl std::error::Error for EncodeErr {}

/// Raised by the binary writer. `records_written` is the number of records
/// confirmed written before the failure; nothing past it is rolled back.
#[derive(Debug)]
pub enum WriteErr {
    Open(std::io::Error),
    Io { source: std::io::Error, records_written: usize },
}

impl fmt::Display for WriteErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "Unable to open destination: {}", e),
            Self::Io { source, records_written } => {
                write!(f, "Write failed after {} record(s): {}", records_written, source)
            }
        }
    }
}

impl std::error::Error for WriteErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErr {
    TruncatedRecord { offset: usize, remaining: usize },
    UnknownOpcode { opcode: u8 },
    InvalidOperand { opcode: u8, operand: u32 },
    /// A record-level error located in a stream.
    AtOffset { offset: usize, cause: Box<DecodeErr> },
}

impl fmt::Display for DecodeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TruncatedRecord { offset, remaining } => {
                write!(f, "Truncated record @ byte {}: {} trailing byte(s)", offset, remaining)
            }
            Self::UnknownOpcode { opcode } => {
                write!(f, "Unknown opcode {:#04x}", opcode)
            }
            Self::InvalidOperand { opcode, operand } => {
                write!(f, "Invalid operand {} for opcode {:#04x}", operand, opcode)
            }
            Self::AtOffset { offset, cause } => {
                write!(f, "{} @ byte {}", cause, offset)
            }
        }
    }
}

impl std::error::Error for DecodeErr {}

/// Fatal session errors. Reaching any of these leaves the session `Failed`.
#[derive(Debug)]
pub enum CompileErr {
    NoValidInstructions { diagnostics: usize },
    Write(WriteErr),
    SessionReused,
}

impl fmt::Display for CompileErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValidInstructions { diagnostics } => {
                write!(f, "No valid instructions to write ({} diagnostic(s))", diagnostics)
            }
            Self::Write(e) => write!(f, "{}", e),
            Self::SessionReused => write!(f, "Compilation session has already run"),
        }
    }
}

impl std::error::Error for CompileErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Write(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WriteErr> for CompileErr {
    fn from(value: WriteErr) -> Self {
        Self::Write(value)
    }
}
