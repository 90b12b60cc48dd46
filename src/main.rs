use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    process::ExitCode,
};

use chrono::Local;
use clap::Parser;
use color_print::cprintln;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bager::actlang::compiler::{CompilationReport, Session, SessionState};
use bager::actlang::record::{read_records, RECORD_SIZE};
use bager::actlang::writer::FileDestination;
use bager::config::config;
use bager::error::Result;
use cli::{Command, CommandLine};

mod cli;

#[derive(Serialize)]
struct ReportFile<'a> {
    source: &'a str,
    output: &'a str,
    state: SessionState,
    compiled_at: String,
    #[serde(flatten)]
    report: &'a CompilationReport,
}

fn prompt_path() -> Result<String> {
    print!("Enter file path: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn write_report(path: &str, report: &ReportFile) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// A failed report write is fatal only when the compile itself succeeded;
/// otherwise it is printed and the compile error is what gets returned.
fn report_outcome<T, E>(written: Result<()>, compiled: &core::result::Result<T, E>) -> Result<()> {
    match (written, compiled) {
        (Err(e), Ok(_)) => Err(e),
        (Err(e), Err(_)) => {
            cprintln!("<yellow>warning</yellow>: {}", e);
            Ok(())
        }
        (Ok(()), _) => Ok(()),
    }
}

fn run_compile(file: Option<String>, out: Option<String>, dump: bool, json_report: Option<String>) -> Result<()> {
    let source_path = match file {
        Some(path) => path,
        None => prompt_path()?,
    };
    let output_path = out.unwrap_or_else(|| config().OUTPUT_PATH.clone());

    let source = std::fs::read_to_string(Path::new(&source_path))?;
    info!("{:<12} - {} -> {}", "COMPILE", source_path, output_path);

    let mut session = Session::new(FileDestination::new(&output_path));
    let result = session.compile_source(&source);

    for diagnostic in session.diagnostics() {
        cprintln!("<yellow>warning</yellow>: {}: {}", source_path, diagnostic);
    }
    if dump {
        print!("{}", session.dump());
    }
    if let Some(report_path) = json_report {
        let report = session.report();
        let written = write_report(&report_path, &ReportFile {
            source: &source_path,
            output: &output_path,
            state: session.state(),
            compiled_at: Local::now().to_rfc3339(),
            report: &report,
        });
        report_outcome(written, &result)?;
    }

    let report = result?;
    cprintln!("<green>Done</green>: {} instruction(s) appended to {}", report.instructions_written, output_path);
    Ok(())
}

fn run_dump(file: &str) -> Result<()> {
    let bytes = std::fs::read(Path::new(file))?;
    for (i, record) in read_records(&bytes)?.iter().enumerate() {
        match record.command() {
            Ok((target, value)) => println!("{:>8}  {}  {}:{}", i * RECORD_SIZE, record, target, value),
            Err(e) => cprintln!("{:>8}  {}  <red>{}</red>", i * RECORD_SIZE, record, e),
        }
    }
    Ok(())
}


fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config().LOG_FILTER)),
        )
        .init();

    let args = CommandLine::parse();
    let result = match args.command {
        Command::Compile { file, out, dump, json_report } => run_compile(file, out, dump, json_report),
        Command::Dump { file } => run_dump(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cprintln!("<red>error</red>: {}", e);
            ExitCode::FAILURE
        }
    }
}
