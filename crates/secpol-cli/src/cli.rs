use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "secpol",
    version,
    about = "Compile exploit-mitigation policy files into loadable rulesets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a policy file and print the ruleset as JSON
    Compile(CompileArgs),
    /// Compile a policy file and report only success or failure
    Check(CompileArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// Policy file to compile
    pub file: PathBuf,

    /// Normalize rule paths lexically instead of resolving them on the
    /// filesystem (paths need not exist)
    #[arg(long)]
    pub no_resolve: bool,

    /// Probe the running kernel for mitigation availability instead of
    /// assuming every mitigation is present
    #[arg(long)]
    pub probe: bool,

    /// Treat only these mitigations as available (repeatable); overrides
    /// the default assume-all oracle
    #[arg(long = "feature", value_name = "MITIGATION")]
    pub features: Vec<String>,
}
