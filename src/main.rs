use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

use sifinfo::presentation::cli::{Cli, Commands};
use sifinfo::{
    FileImageLoader, InspectImageUseCase, InspectOptions, OutputFormat, RenderContext,
};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Payload dumps go to stdout, so logs must stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    let use_case = InspectImageUseCase::new(FileImageLoader::new());

    match cli.command {
        Commands::Header { path } => {
            let mut out = RenderContext::new(io::stdout().lock()).with_format(format);
            use_case
                .print_header(&path, &mut out)
                .with_context(|| format!("Failed to print header of {}", path.display()))?;
        }
        Commands::List { path } => {
            let mut out = RenderContext::new(io::stdout().lock()).with_format(format);
            use_case
                .list_descriptors(&path, &mut out)
                .with_context(|| format!("Failed to list descriptors of {}", path.display()))?;
        }
        Commands::Info { id, path } => {
            let mut out = RenderContext::new(io::stdout().lock()).with_format(format);
            use_case
                .print_descriptor_info(&path, id, &mut out)
                .with_context(|| {
                    format!("Failed to show descriptor {} of {}", id, path.display())
                })?;
        }
        Commands::Dump {
            id,
            path,
            output,
            buffer_kib,
        } => {
            let use_case = use_case.with_options(
                InspectOptions::default().with_copy_buffer_size(buffer_kib.saturating_mul(1024)),
            );

            let mut sink: Box<dyn Write> = match &output {
                Some(out_path) => Box::new(BufWriter::new(File::create(out_path).with_context(
                    || format!("Failed to create output file: {}", out_path.display()),
                )?)),
                None => Box::new(io::stdout().lock()),
            };

            use_case
                .dump_descriptor_data(&path, id, sink.as_mut())
                .with_context(|| {
                    format!("Failed to dump descriptor {} of {}", id, path.display())
                })?;
        }
    }

    Ok(())
}
