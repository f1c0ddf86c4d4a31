//! `fmt` subcommand: rewrite configuration formatting, or verify it with
//! --check (tofu exits non-zero when files would change).

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{RenderOpts, run_and_render};
use crate::tofu::Invocation;

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Check formatting without modifying files
    #[arg(long)]
    pub check: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Print the composed command without executing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute_fmt(args: FmtArgs) -> Result<i32> {
    run_and_render(
        &Invocation::fmt(args.check),
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
    fn check_flag_flows_into_invocation() {
        assert_eq!(
            Invocation::fmt(true).shell_line(),
            "cd terraform && tofu fmt -check"
        );
        assert_eq!(
            Invocation::fmt(false).shell_line(),
            "cd terraform && tofu fmt"
        );
    }
}
