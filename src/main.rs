use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use audiolengths::command::report::{Mode, Reporter};
use audiolengths::command::tree::build;
use audiolengths::utils::probe::SymphoniaProbe;
use audiolengths::utils::time::Style;
use clap::Parser;
use log::debug;

// Define CLI application structure using clap
#[derive(Parser)]
#[command(version, about = "Print the lengths of audio files", long_about = None)]
struct Cli {
    /// An audio file or a directory to search
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Recursively search subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Only print the total length for all files
    #[arg(short, long)]
    total: bool,

    /// Print lengths as weeks, days, hours, minutes and seconds
    #[arg(short = 'H', long)]
    readable: bool,
}

fn main() -> ExitCode {
    // Silent unless `RUST_LOG` is set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    let program = program_name();

    match run(&cli, &program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", program, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, program: &str) -> anyhow::Result<()> {
    let mode = if cli.total { Mode::Total } else { Mode::Summary };
    debug!(
        "{} path(s), recursive: {}, mode: {:?}",
        cli.files.len(),
        cli.recursive,
        mode
    );

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut reporter = Reporter::new(
        program,
        Style::from_readable(cli.readable),
        stdout.lock(),
        stderr.lock(),
    );

    let mut problems = Vec::new();
    let built = build(&cli.files, cli.recursive, &SymphoniaProbe, &mut problems);
    reporter.problems(&problems)?;

    reporter.report(&built?, mode)?;
    Ok(())
}

// Errors are prefixed with the name the program was invoked as.
fn program_name() -> String {
    env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
