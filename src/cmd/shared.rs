/*!
shared.rs - run/render path common to the six operation subcommands.

Each `execute_*` maps its flags onto an `Invocation` and hands it here.
This module:
  - short-circuits --dry-run (print the redacted command, run nothing)
  - logs the redacted command at debug level
  - executes and renders the verbatim result (JSON or styled human output)
  - returns the child's exit code so main can pass it through

No interpretation of tofu output happens here; stdout/stderr/exit code flow
to the caller exactly as captured.
*/

use anyhow::Result;
use std::time::Instant;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, kv_block};
use crate::log_debug;
use crate::tofu::exec::RunOutput;
use crate::tofu::{Invocation, Secrets, TOFU_DIR, exec};

/// Output switches shared by every operation subcommand.
#[derive(Debug, Clone, Copy)]
pub struct RenderOpts {
    pub json: bool,
    pub dry_run: bool,
}

/// Execute (or dry-run) an invocation and render the result.
/// Returns the exit code the process should finish with.
pub fn run_and_render(inv: &Invocation, opts: RenderOpts) -> Result<i32> {
    if opts.dry_run {
        render_dry_run(inv, opts.json);
        return Ok(0);
    }

    log_debug!("executing: {}", inv.shell_line());
    let secrets = Secrets::from_env();

    let started = Instant::now();
    let out = exec::run(inv, &secrets)?;
    let elapsed_ms = started.elapsed().as_millis();

    if opts.json {
        render_json(inv, &out, elapsed_ms);
    } else {
        render_human(inv, &out, elapsed_ms);
    }
    Ok(out.exit_code)
}

fn render_dry_run(inv: &Invocation, json: bool) {
    if json {
        let payload = serde_json::json!({
            "status": "ok",
            "action": inv.action().subcommand(),
            "dry_run": true,
            "command": inv.shell_line(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let header = box_header(
            format!("{} tofu {} (dry run)", emoji("info", &style), inv.action()),
            None::<&str>,
            &style,
        );
        println!("{header}");
        println!("{}", inv.shell_line());
    }
}

fn render_json(inv: &Invocation, out: &RunOutput, elapsed_ms: u128) {
    let payload = serde_json::json!({
        "status": if out.success() { "ok" } else { "failed" },
        "action": inv.action().subcommand(),
        "command": inv.shell_line(),
        "exit_code": out.exit_code,
        "elapsed_ms": elapsed_ms,
        "stdout": out.stdout,
        "stderr": out.stderr,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
    );
}

fn render_human(inv: &Invocation, out: &RunOutput, elapsed_ms: u128) {
    let style = StyleOptions::detect();
    let (tag, verdict) = if out.success() {
        ("success", color(Role::Success, "ok", &style))
    } else {
        ("error", color(Role::Error, "failed", &style))
    };
    let header = box_header(
        format!("{} tofu {} {}", emoji(tag, &style), inv.action(), verdict),
        Some(format!("exit={} • {elapsed_ms} ms", out.exit_code)),
        &style,
    );
    println!("{header}");

    let details = kv_block(
        &[
            ("dir", format!("{TOFU_DIR}/")),
            ("command", inv.shell_line()),
        ],
        &style,
    );
    println!("{details}");

    if !out.stdout.is_empty() {
        println!();
        print!("{}", out.stdout);
        if !out.stdout.ends_with('\n') {
            println!();
        }
    }
    if !out.stderr.is_empty() {
        eprint!("{}", color(Role::Error, &out.stderr, &style));
        if !out.stderr.ends_with('\n') {
            eprintln!();
        }
    }
}
