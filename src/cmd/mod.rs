/*!
Command dispatcher module: one file per subcommand.

Layout:
  src/cmd/
    mod.rs       (module declarations + re-exports)
    plan.rs      apply.rs  init.rs  validate.rs  fmt.rs  destroy.rs
    serve.rs     (MCP stdio server)
    shared.rs    (run/render path used by all six operations)
    format.rs    (styling helpers for human output)

Conventions:
  - Each subcommand module exposes one public `execute_*` returning
    `anyhow::Result<i32>`; the i32 is the exit code main finishes with
    (the tofu child's code passes through unchanged).
  - Argument structs derive `clap::Args` and stay minimal.
*/

pub mod apply;
pub mod destroy;
pub mod fmt;
pub mod format;
pub mod init;
pub mod plan;
pub mod serve;
pub mod shared;
pub mod validate;

pub use apply::{ApplyArgs, execute_apply};
pub use destroy::{DestroyArgs, execute_destroy};
pub use fmt::{FmtArgs, execute_fmt};
pub use init::{InitArgs, execute_init};
pub use plan::{PlanArgs, execute_plan};
pub use serve::{ServeArgs, execute_serve};
pub use validate::{ValidateArgs, execute_validate};
