//! `apply` subcommand.
//!
//! Without --auto-approve the child blocks on tofu's own interactive
//! confirmation prompt; that is tofu's behavior, not something this layer
//! replicates or suppresses.

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{RenderOpts, run_and_render};
use crate::tofu::Invocation;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Limit the apply to a single resource or module address
    #[arg(long, value_name = "ADDR")]
    pub target: Option<String>,

    /// Skip tofu's interactive approval prompt
    #[arg(long)]
    pub auto_approve: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Print the composed command without executing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute_apply(args: ApplyArgs) -> Result<i32> {
    let inv = Invocation::apply(args.target.as_deref(), args.auto_approve)?;
    run_and_render(
        &inv,
        RenderOpts {
            json: args.json,
            dry_run: args.dry_run,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_flag_flows_into_invocation() {
        let inv = Invocation::apply(None, true).unwrap();
        assert!(inv.shell_line().ends_with("-auto-approve"));
        let inv = Invocation::apply(None, false).unwrap();
        assert!(!inv.shell_line().contains("-auto-approve"));
    }
}
