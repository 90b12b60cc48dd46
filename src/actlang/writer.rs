use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::error::WriteErr;
use super::instruction::Instruction;
use super::record::{Record, RECORD_SIZE};

/// Something records can be appended to. Opening must never truncate what
/// is already there.
pub trait Destination {
    fn open_append(&mut self) -> std::io::Result<Box<dyn Write + '_>>;
}

/// An on-disk binary store, opened with create + append.
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Destination for FileDestination {
    fn open_append(&mut self) -> std::io::Result<Box<dyn Write + '_>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(Box::new(file))
    }
}

impl Destination for Vec<u8> {
    fn open_append(&mut self) -> std::io::Result<Box<dyn Write + '_>> {
        Ok(Box::new(self))
    }
}

/// Appends one record per instruction to `out`, in order.
///
/// Records are written one at a time so that on failure the error can say
/// how many made it. Nothing already written is rolled back.
pub fn write_records(instructions: &[Instruction], out: &mut dyn Write) -> Result<usize, WriteErr> {
    let mut written = 0;
    for instruction in instructions {
        out.write_all(&Record::from(instruction).encode())
            .map_err(|source| WriteErr::Io { source, records_written: written })?;
        written += 1;
    }
    out.flush()
        .map_err(|source| WriteErr::Io { source, records_written: written })?;
    Ok(written * RECORD_SIZE)
}

/// Opens `destination` for appending and writes every instruction to it.
/// Returns the number of bytes appended.
pub fn write(instructions: &[Instruction], destination: &mut dyn Destination) -> Result<usize, WriteErr> {
    let mut out = destination.open_append().map_err(|e| {
        warn!("{:<12} - unable to open destination: {e}", "WRITER");
        WriteErr::Open(e)
    })?;
    let bytes = write_records(instructions, &mut *out)?;
    debug!("{:<12} - appended {} record(s), {} byte(s)", "WRITER", instructions.len(), bytes);
    Ok(bytes)
}
