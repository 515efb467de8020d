//! Train demo entry-point: parse arguments, print the bound settings as JSON.

use std::io::{self, Write};

use optmatch::TokenStream;

use train_cli::error::Result;
use train_cli::{Summary, build_cli, settings};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let tokens = TokenStream::from_env();
    let mut cli = build_cli()?;
    cli.parse_all(&tokens);
    let summary = Summary::from(settings(&cli)?);
    tracing::debug!(total = summary.total, "parsed command line");
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;
    Ok(())
}
