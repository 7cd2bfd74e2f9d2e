// src/main.rs
//
// prettymin — prettify or minify a CSS/HTML file (or STDIN)
//
// - The whole input is one selection: it is transformed and written back, or left alone.
// - Whitespace-only input is passed through untouched.
// - On failure nothing is written; the message goes to stderr and the exit code is 1.
//
// Usage:
//   prettymin css-prettify style.css            (rewrite in place)
//   prettymin html-minify page.html out.html    (write elsewhere)
//   cat a.css | prettymin css-minify -          (STDIN → STDOUT)
//
// Set RUST_LOG=debug for per-operation sizes, RUST_LOG=prettymin::html=trace for tokens.

use clap::Parser;
use prettymin::{FormatError, Operation};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// css-prettify, css-minify, html-prettify or html-minify
    operation: Operation,

    /// Input file, or "-" for STDIN
    input: PathBuf,

    /// Output file (default: overwrite input, or STDOUT when reading STDIN)
    output: Option<PathBuf>,

    /// Write the result to STDOUT instead of a file
    #[arg(long)]
    stdout: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

fn main() -> ExitCode {
    env_logger::init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let from_stdin = cli.input.as_os_str() == "-";
    let src = read_input(&cli.input, from_stdin)?;

    let out = if src.trim().is_empty() {
        src
    } else {
        cli.operation.apply(&src)?
    };
    log::info!("{}", cli.operation.success_message());

    let target = if cli.stdout {
        None
    } else {
        cli.output
            .as_ref()
            .or((!from_stdin).then_some(&cli.input))
    };
    match target {
        Some(path) => fs::write(path, out).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        }),
        None => io::stdout()
            .lock()
            .write_all(out.as_bytes())
            .map_err(|source| CliError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}

fn read_input(path: &Path, from_stdin: bool) -> Result<String, CliError> {
    let res = if from_stdin {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src).map(|_| src)
    } else {
        fs::read_to_string(path)
    };
    res.map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
