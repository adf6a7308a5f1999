use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use markdown_preview::{run, ExitCode, PreviewRequest, SystemViewer};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render markdown to sanitized HTML and open it", long_about = None)]
struct Cli {
    /// Markdown file to preview (also accepted as -file)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Skip auto-preview: print the HTML path and leave the file in place
    #[arg(short = 's', long = "skip-preview")]
    skip_preview: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.verbose);

    let exit = match execute(cli) {
        Ok(exit) | Err(exit) => exit,
    };
    std::process::ExitCode::from(exit as u8)
}

fn execute(cli: Cli) -> Result<ExitCode, ExitCode> {
    let Some(file) = cli.file else {
        let mut usage = Cli::command();
        eprintln!("{}", usage.render_help());
        return Err(ExitCode::Usage);
    };

    let request = PreviewRequest::new(file).skip_preview(cli.skip_preview);
    match run(request, &SystemViewer::new()) {
        Ok(outcome) => {
            println!("{}", outcome.output.display());
            Ok(ExitCode::Success)
        }
        Err(err) => {
            eprintln!("mdp: {err}");
            Err(err.exit_code())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Accept Go-style single-dash long flags (`-file x`, `-file=x`).
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-file") => OsString::from("--file"),
            Some(text) if text.starts_with("-file=") => OsString::from(format!("-{text}")),
            _ => arg,
        })
        .collect()
}
