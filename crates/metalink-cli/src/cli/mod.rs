//! CLI for inspecting metalink files and verifying downloads.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use metalink_core::{config, HashAlgorithm};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_checksum, run_completions, run_inspect, run_verify, VerifyArgs};

/// Top-level CLI for mlk.
#[derive(Debug, Parser)]
#[command(name = "mlk")]
#[command(about = "mlk: inspect metalink files and verify downloads against them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the files, mirrors and checksums in a metalink document.
    Inspect {
        /// Path or http(s)/ftp URL of the metalink document.
        source: String,
        /// Print the decoded document as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a local file against the checksum its metalink entry declares.
    Verify {
        /// Path or http(s)/ftp URL of the metalink document.
        source: String,
        /// Local file to verify.
        file: PathBuf,
        /// Name of the metalink file entry (default: the entry matching FILE's name, or the only entry).
        #[arg(long)]
        name: Option<String>,
        /// Checksum algorithm as declared in the document (e.g. sha256). Default: config, then strongest declared.
        #[arg(long, short)]
        algorithm: Option<String>,
    },

    /// Compute the digest of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
        /// md5, sha1, sha256 or sha512.
        #[arg(long, short, default_value = "sha256")]
        algorithm: HashAlgorithm,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    /// Parse arguments, run the command, and return the process exit code.
    /// A checksum mismatch exits with 2; errors are returned to `main` (exit 1).
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Inspect { source, json } => run_inspect(&cfg, &source, json)?,
            CliCommand::Verify {
                source,
                file,
                name,
                algorithm,
            } => {
                let args = VerifyArgs {
                    source,
                    file,
                    name,
                    algorithm,
                };
                if !run_verify(&cfg, &args)? {
                    return Ok(ExitCode::from(2));
                }
            }
            CliCommand::Checksum { path, algorithm } => run_checksum(&path, algorithm)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests;
