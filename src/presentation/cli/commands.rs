//! CLI commands using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sifinfo - SIF image inspector
///
/// Prints the global header, lists descriptors, shows a single descriptor
/// and dumps object payloads of Singularity Image Format files.
#[derive(Parser, Debug)]
#[command(name = "sifinfo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect SIF container images", long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Render header, list and info output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the global header
    Header {
        /// Path to the SIF image
        path: PathBuf,
    },

    /// List occupied descriptors
    List {
        /// Path to the SIF image
        path: PathBuf,
    },

    /// Display one descriptor in detail
    Info {
        /// Descriptor ID
        id: u32,

        /// Path to the SIF image
        path: PathBuf,
    },

    /// Write a descriptor's payload to stdout or a file
    Dump {
        /// Descriptor ID
        id: u32,

        /// Path to the SIF image
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Copy buffer size in KiB
        #[arg(long, default_value_t = 64)]
        buffer_kib: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump() {
        let cli = Cli::parse_from(["sifinfo", "dump", "3", "image.sif", "-o", "out.bin"]);
        match cli.command {
            Commands::Dump {
                id, path, output, ..
            } => {
                assert_eq!(id, 3);
                assert_eq!(path, PathBuf::from("image.sif"));
                assert_eq!(output, Some(PathBuf::from("out.bin")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["sifinfo", "list", "image.sif", "--json", "-v"]);
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["sifinfo", "info", "abc", "image.sif"]).is_err());
    }
}
