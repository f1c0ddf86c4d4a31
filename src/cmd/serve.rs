//! `serve` subcommand: run the MCP stdio server until the host disconnects.

use anyhow::{Context, Result};
use clap::Args;

use crate::log_info;

#[derive(Args, Debug)]
pub struct ServeArgs {}

pub fn execute_serve(_args: ServeArgs) -> Result<i32> {
    log_info!("serving tofu tools over stdio");
    let rt = tokio::runtime::Runtime::new().context("failed to create Tokio runtime")?;
    rt.block_on(crate::mcp::run_server())?;
    Ok(0)
}
