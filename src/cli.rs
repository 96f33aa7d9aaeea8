use std::process;

use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::config::{Arch, BootstrapRequest};

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    /// Target root directory to provision
    #[arg(short, long, value_name = "PATH")]
    pub root: Utf8PathBuf,

    /// Distribution tag: SLED-<ver>, SLES-<ver> or openSUSE-<ver>
    #[arg(short, long, value_name = "TAG")]
    pub distro: Option<String>,

    /// Target architecture (defaults to the host architecture)
    #[arg(short, long)]
    pub arch: Option<Arch>,

    /// Registration code (required for SLED/SLES)
    #[arg(short = 'c', long, value_name = "CODE")]
    pub regcode: Option<String>,

    /// Root password, written verbatim into the target shadow file
    #[arg(short = 'p', long, value_name = "VALUE")]
    pub root_pass: Option<String>,

    /// Non-interactive mode with suppressed package manager output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print external commands instead of executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Set the log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Builds the immutable bootstrap request from the parsed arguments.
    pub fn into_request(self) -> BootstrapRequest {
        BootstrapRequest {
            root: self.root,
            distro: self.distro,
            arch: self.arch.unwrap_or_else(Arch::host),
            reg_code: self.regcode,
            root_pass: self.root_pass,
            quiet: self.quiet,
            dry_run: self.dry_run,
        }
    }
}

/// Represents log levels for controlling the verbosity of logging output.
///
/// Maps directly to the log levels used by the `tracing` crate. For
/// example, `--log-level debug` enables debug-level logging output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Parses the command line.
///
/// Help and version requests print and exit 0; every other parse failure
/// (unknown option, missing option value, out-of-enum value) prints
/// clap's one-line diagnosis and exits 1, matching the exit-code
/// contract of the tool's own validation failures.
pub fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(0);
            }
            _ => {
                let _ = e.print();
                process::exit(1);
            }
        },
    }
}
