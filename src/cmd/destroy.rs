//! `destroy` subcommand: tear down managed infrastructure.
//!
//! Same variable assignments as plan/apply; without --auto-approve the
//! child blocks on tofu's confirmation prompt.

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{RenderOpts, run_and_render};
use crate::tofu::Invocation;

#[derive(Args, Debug)]
pub struct DestroyArgs {
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

pub fn execute_destroy(args: DestroyArgs) -> Result<i32> {
    run_and_render(
        &Invocation::destroy(args.auto_approve),
        RenderOpts {
            json: args.json,
            dry_run: args.dry_run,
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::tofu::Invocation;

    #[test]
    fn destroy_carries_vars_and_optional_approve() {
        let line = Invocation::destroy(true).shell_line();
        assert!(line.contains("tofu destroy"));
        assert!(line.contains("-var=\"hcloud_token=$HCLOUD_TOKEN\""));
        assert!(line.ends_with("-auto-approve"));
    }
}
