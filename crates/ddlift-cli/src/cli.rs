//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

use ddlift_codegen::Destination;

#[derive(Parser)]
#[command(name = "ddlift")]
#[command(about = "Lower a JSON BNF grammar with SMT bounds and guards into DDL source")]
#[command(version)]
pub(crate) struct Cli {
    /// Grammar hand-off document (JSON)
    pub(crate) grammar: PathBuf,

    /// Output file, or '-' to render without persisting
    #[arg(short, long, default_value = Destination::STDOUT_SENTINEL)]
    pub(crate) output: Destination,

    /// Lowering configuration (JSON): entry_name, rule_prefix, index_var_prefix
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}
