//! gengarc - command-line front end for the gengar compiler.
//!
//! Compiles a single `.gengar` file to its target-language equivalent
//! plus a Source Map v3 file, and prints a rendered diagnostic with a
//! non-zero exit code on failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gengar_drv::{render_error, Config, Session};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compile a gengar source file.
#[derive(Parser, Debug)]
#[command(name = "gengarc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles gengar source files")]
struct Cli {
    /// Path to the .gengar source file.
    input: PathBuf,

    /// Output file path (default: input with its extension replaced by .js).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip writing a .js.map file.
    #[arg(long)]
    no_source_map: bool,

    /// Raise the default log level from `info` to `debug`.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("GENGARC_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let mut config = Config::new(cli.input);
    config.output_file = cli.output;
    config.emit_source_map = !cli.no_source_map;

    let mut session = Session::new(config);
    match session.compile_and_write() {
        Ok(path) => {
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_error(&err, &session.sources));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_replaces_extension() {
        let config = Config::new("demos/hello.gengar");
        assert_eq!(config.resolved_output_file(), PathBuf::from("demos/hello.js"));
    }
}
