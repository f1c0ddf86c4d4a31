//! `plan` subcommand: preview changes, optionally scoped to one address.

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{RenderOpts, run_and_render};
use crate::tofu::Invocation;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Limit the plan to a single resource or module address
    /// (e.g. 'module.workload_cluster')
    #[arg(long, value_name = "ADDR")]
    pub target: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Print the composed command without executing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute_plan(args: PlanArgs) -> Result<i32> {
    let inv = Invocation::plan(args.target.as_deref())?;
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
    use crate::tofu::TofuAction;

    #[test]
    fn target_flows_into_invocation() {
        let inv = Invocation::plan(Some("module.workload_cluster")).unwrap();
        assert_eq!(inv.action(), TofuAction::Plan);
        assert!(inv.shell_line().contains("-target=module.workload_cluster"));
    }
}
