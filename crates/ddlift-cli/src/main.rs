mod cli;

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use tracing_subscriber::EnvFilter;

use ddlift_codegen::{dump, CodegenError, LoweringConfig, WriteOutcome};

use crate::cli::Cli;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LoweringConfig::load(path)
            .into_diagnostic()
            .wrap_err("invalid lowering configuration")?,
        None => LoweringConfig::default(),
    };

    let grammar = ddlift_grammar::load(&cli.grammar)?;
    tracing::debug!(
        productions = grammar.len(),
        grammar = %cli.grammar.display(),
        "grammar loaded"
    );

    match dump(&grammar, &cli.output, &config) {
        Ok(WriteOutcome::Written { bytes, .. }) => tracing::debug!(bytes, "document written"),
        Ok(WriteOutcome::NotPersisted) => tracing::info!("output is '-', nothing written"),
        // An unwritable destination is reported, not fatal.
        Err(CodegenError::Write(err)) => tracing::error!("{err}"),
        Err(CodegenError::Lowering(err)) => {
            return Err(err)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to lower {}", cli.grammar.display()));
        }
    }
    Ok(())
}
