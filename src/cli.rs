use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(name = "bager", about = "B.A.G.E.R. actuator instruction compiler")]
pub struct CommandLine {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile an instruction file and append it to the binary store.
    Compile {
        /// Instruction file. Prompted for when absent.
        file: Option<String>,
        #[clap(long)]
        out: Option<String>,
        #[clap(long, action)]
        dump: bool,
        #[clap(long = "json-report")]
        json_report: Option<String>,
    },
    /// Print the records held in a binary store.
    Dump {
        file: String,
    },
}
