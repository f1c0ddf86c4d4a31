use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod mcp;
mod tofu;
mod utils;

use cmd::{ApplyArgs, DestroyArgs, FmtArgs, InitArgs, PlanArgs, ServeArgs, ValidateArgs};

/// tofu-mcp - run OpenTofu operations against the fixed `terraform/`
/// directory, directly or as MCP tools.
///
/// Operations:
///   tofu-mcp plan     [--target ADDR] [--json] [--dry-run]
///   tofu-mcp apply    [--target ADDR] [--auto-approve] [--json] [--dry-run]
///   tofu-mcp init     [--json] [--dry-run]
///   tofu-mcp validate [--json] [--dry-run]
///   tofu-mcp fmt      [--check] [--json] [--dry-run]
///   tofu-mcp destroy  [--auto-approve] [--json] [--dry-run]
///   tofu-mcp serve    (expose the six operations as MCP tools over stdio)
///
/// plan/apply/destroy pass three input variables to tofu, sourced from the
/// environment: HCLOUD_TOKEN, LETSENCRYPT_EMAIL, HETZNER_DNS_API_TOKEN.
/// Unset variables reach tofu as empty values and fail there, not here.
///
/// The tofu child's exit code becomes this process's exit code; its output
/// is passed through without interpretation.
#[derive(Parser, Debug)]
#[command(
    name = "tofu-mcp",
    version,
    author,
    about = "OpenTofu plan/apply/init/validate/fmt/destroy as a CLI and MCP server",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview infrastructure changes
    Plan(PlanArgs),

    /// Apply infrastructure changes
    Apply(ApplyArgs),

    /// Initialize the terraform working directory
    Init(InitArgs),

    /// Validate configuration files
    Validate(ValidateArgs),

    /// Format configuration files, or verify formatting with --check
    Fmt(FmtArgs),

    /// Destroy managed infrastructure
    Destroy(DestroyArgs),

    /// Serve the operations as MCP tools over stdio
    Serve(ServeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let code = match cli.command {
        Commands::Plan(args) => cmd::execute_plan(args)?,
        Commands::Apply(args) => cmd::execute_apply(args)?,
        Commands::Init(args) => cmd::execute_init(args)?,
        Commands::Validate(args) => cmd::execute_validate(args)?,
        Commands::Fmt(args) => cmd::execute_fmt(args)?,
        Commands::Destroy(args) => cmd::execute_destroy(args)?,
        Commands::Serve(args) => cmd::execute_serve(args)?,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
