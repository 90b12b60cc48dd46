use core::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::encoder::encode;
use super::error::{CompileErr, EncodeErr};
use super::instruction::Instruction;
use super::writer::{write, Destination};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum SessionState {
    Idle,
    Encoding,
    Writing,
    Done,
    Failed,
}

/// A recoverable per-line error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
    #[serde(skip)]
    pub error: EncodeErr,
}

impl Diagnostic {
    fn new(line: usize, error: EncodeErr) -> Self {
        Self {
            line,
            message: error.to_string(),
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompilationReport {
    pub instructions_written: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives one compilation run: encodes every line, collects diagnostics and
/// appends what encoded cleanly to the destination.
pub struct Session<D: Destination> {
    destination: D,
    state: SessionState,
    instructions: Vec<Instruction>,
    diagnostics: Vec<Diagnostic>,
    instructions_written: usize,
}

impl<D: Destination> Session<D> {
    pub fn new(destination: D) -> Self {
        Self {
            destination,
            state: SessionState::Idle,
            instructions: vec![],
            diagnostics: vec![],
            instructions_written: 0,
        }
    }

    /// Compiles `lines`, numbering them from 1.
    pub fn compile<I, S>(&mut self, lines: I) -> Result<CompilationReport, CompileErr>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.compile_numbered(lines.into_iter().enumerate().map(|(i, line)| (i + 1, line)))
    }

    /// Compiles a whole source text. Blank lines and lines starting with `#`
    /// are skipped; diagnostics keep the line numbers of the text.
    pub fn compile_source(&mut self, source: &str) -> Result<CompilationReport, CompileErr> {
        self.compile_numbered(
            source
                .lines()
                .enumerate()
                .map(|(i, line)| (i + 1, line))
                .filter(|(_, line)| {
                    let line = line.trim();
                    !line.is_empty() && !line.starts_with('#')
                }),
        )
    }

    fn compile_numbered<I, S>(&mut self, lines: I) -> Result<CompilationReport, CompileErr>
    where
        I: Iterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        if self.state != SessionState::Idle {
            return Err(CompileErr::SessionReused);
        }

        self.transition(SessionState::Encoding);
        for (number, line) in lines {
            match encode(line.as_ref()) {
                Ok(instruction) => self.instructions.push(instruction),
                Err(e) => {
                    warn!("{:<12} - line {}: {}", "DIAGNOSTIC", number, e);
                    self.diagnostics.push(Diagnostic::new(number, e));
                }
            }
        }

        if self.instructions.is_empty() {
            self.transition(SessionState::Failed);
            return Err(CompileErr::NoValidInstructions { diagnostics: self.diagnostics.len() });
        }

        self.transition(SessionState::Writing);
        if let Err(e) = write(&self.instructions, &mut self.destination) {
            self.transition(SessionState::Failed);
            return Err(e.into());
        }

        self.instructions_written = self.instructions.len();
        self.transition(SessionState::Done);
        info!("{:<12} - {} instruction(s) written, {} diagnostic(s)",
            "COMPILE", self.instructions_written, self.diagnostics.len());
        Ok(self.report())
    }

    fn transition(&mut self, next: SessionState) {
        debug!("{:<12} - {} -> {}", "SESSION", self.state, next);
        self.state = next;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn report(&self) -> CompilationReport {
        CompilationReport {
            instructions_written: self.instructions_written,
            diagnostics: self.diagnostics.clone(),
        }
    }

    /// Listing of the encoded instructions, one per line.
    pub fn dump(&self) -> String {
        let mut result = String::from("=== DUMPING DATA ===\n");
        for (i, instruction) in self.instructions.iter().enumerate() {
            result.push_str(&format!("{:>4}  {:<24} {}\n", i, instruction.raw(), instruction));
        }
        result
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub fn into_destination(self) -> D {
        self.destination
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::*;
    use crate::actlang::{error::WriteErr, record::read_commands, writer::FileDestination};

    struct Unwritable;

    impl Destination for Unwritable {
        fn open_append(&mut self) -> io::Result<Box<dyn Write + '_>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn two_valid_lines() {
        let mut session = Session::new(Vec::<u8>::new());
        let report = session.compile(["power:50", "direction:clockwise"]).expect("both lines valid");
        assert_eq!(report.instructions_written, 2);
        assert!(report.diagnostics.is_empty());
        assert_eq!(session.state(), SessionState::Done);
        assert_eq!(read_commands(session.destination()).expect("decodable").len(), 2);
    }

    #[test]
    fn double_colon_fails_session() {
        let mut session = Session::new(Vec::<u8>::new());
        let result = session.compile(["motor:power:50"]);
        assert!(matches!(result, Err(CompileErr::NoValidInstructions { diagnostics: 1 })));
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.diagnostics().len(), 1);
        assert_eq!(session.diagnostics()[0].line, 1);
        assert!(matches!(session.diagnostics()[0].error, EncodeErr::MalformedLine { .. }));
        assert!(session.destination().is_empty());
    }

    #[test]
    fn out_of_range_power_fails_session() {
        let mut session = Session::new(Vec::<u8>::new());
        assert!(session.compile(["power:150"]).is_err());
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.report().diagnostics.len(), 1);
        assert!(matches!(session.diagnostics()[0].error, EncodeErr::InvalidValue { .. }));
        assert_eq!(session.report().instructions_written, 0);
    }

    #[test]
    fn bad_lines_do_not_abort_batch() {
        let mut session = Session::new(Vec::<u8>::new());
        let report = session
            .compile(["boom:up", "boom:sideways", "power:75", "nonsense", "arm:down"])
            .expect("three valid lines");
        assert_eq!(report.instructions_written, 3);
        let lines: Vec<usize> = report.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn source_skips_blank_and_comment_lines() {
        let source = "# warm up\npower:20\n\n  # raise\nboom:up\ncabin:north\n";
        let mut session = Session::new(Vec::<u8>::new());
        let report = session.compile_source(source).expect("two valid lines");
        assert_eq!(report.instructions_written, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].line, 6);
    }

    #[test]
    fn write_failure_fails_session() {
        let mut session = Session::new(Unwritable);
        let result = session.compile(["power:10"]);
        assert!(matches!(result, Err(CompileErr::Write(WriteErr::Open(_)))));
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.report().instructions_written, 0);
    }

    #[test]
    fn session_runs_once() {
        let mut session = Session::new(Vec::<u8>::new());
        session.compile(["power:10"]).expect("valid line");
        assert!(matches!(session.compile(["power:10"]), Err(CompileErr::SessionReused)));
        assert_eq!(session.state(), SessionState::Done);
    }

    #[test]
    fn identical_input_identical_output() {
        let lines = ["power:30", "state:high", "treads:left", "bucket:back"];
        let dir = tempfile::tempdir().expect("temp dir");

        let mut outputs = vec![];
        for name in ["a.bin", "b.bin"] {
            let path = dir.path().join(name);
            let mut session = Session::new(FileDestination::new(&path));
            session.compile(lines).expect("valid lines");
            outputs.push(std::fs::read(&path).expect("read back"));
        }
        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(outputs[0].len(), 20);
    }

    #[test]
    fn sessions_append_to_shared_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("inst.bin");

        Session::new(FileDestination::new(&path)).compile(["power:1", "power:2"]).expect("first run");
        Session::new(FileDestination::new(&path)).compile(["arm:up"]).expect("second run");

        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(read_commands(&bytes).expect("decodable").len(), 3);
    }

    #[test]
    fn dump_lists_instructions() {
        let mut session = Session::new(Vec::<u8>::new());
        session.compile(["power:5", "cabin:right"]).expect("valid lines");
        let dump = session.dump();
        assert!(dump.starts_with("=== DUMPING DATA ==="));
        assert!(dump.contains("motor.power:5"));
        assert!(dump.contains("cabin_direction:right"));
    }
}
