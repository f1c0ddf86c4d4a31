//! `validate` subcommand.

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{RenderOpts, run_and_render};
use crate::tofu::Invocation;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Print the composed command without executing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute_validate(args: ValidateArgs) -> Result<i32> {
    run_and_render(
        &Invocation::validate(),
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
    fn validate_takes_no_flags_or_vars() {
        assert_eq!(
            Invocation::validate().shell_line(),
            "cd terraform && tofu validate"
        );
    }
}
