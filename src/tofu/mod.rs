/*!
Composition of tofu command lines.

Secrets     - env-derived input variables, captured once and injected
TofuAction  - the six supported subcommands
Invocation  - per-operation constructors + pure argv composition

Execution lives in `exec.rs`. Nothing here touches a shell: arguments are
composed as a vector and handed to the process spawn primitive directly, so
a hostile target string cannot break out of its argument. The `$VAR` shell
rendering survives only in `shell_line()` for logs and `--dry-run`, where
secret values must not appear.
*/

use anyhow::{Result, bail};
use std::fmt;

pub mod exec;

/// Binary every operation runs.
pub const TOFU_BIN: &str = "tofu";

/// Fixed working directory, relative to the invocation root. No operation
/// accepts a custom path.
pub const TOFU_DIR: &str = "terraform";

/// Environment variables backing the three input variables.
pub const ENV_HCLOUD_TOKEN: &str = "HCLOUD_TOKEN";
pub const ENV_LETSENCRYPT_EMAIL: &str = "LETSENCRYPT_EMAIL";
pub const ENV_HETZNER_DNS_API_TOKEN: &str = "HETZNER_DNS_API_TOKEN";

/// Secret-backed input variables for plan/apply/destroy.
///
/// Captured from the environment once (process startup for the CLI, server
/// construction for MCP) and injected into the builder, which keeps argv
/// composition pure and testable with synthetic values.
///
/// An unset variable resolves to the empty string; tofu then reports its own
/// undefined-variable or authentication error. Populating the environment is
/// the caller's precondition, not validated here.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub hcloud_token: String,
    pub letsencrypt_email: String,
    pub hetzner_dns_api_token: String,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            hcloud_token: std::env::var(ENV_HCLOUD_TOKEN).unwrap_or_default(),
            letsencrypt_email: std::env::var(ENV_LETSENCRYPT_EMAIL).unwrap_or_default(),
            hetzner_dns_api_token: std::env::var(ENV_HETZNER_DNS_API_TOKEN).unwrap_or_default(),
        }
    }

    /// The three `-var=key=value` assignments, in fixed order. No shell is
    /// involved, so the values need no quoting.
    fn var_args(&self) -> Vec<String> {
        vec![
            format!("-var=hcloud_token={}", self.hcloud_token),
            format!("-var=letsencrypt_email={}", self.letsencrypt_email),
            format!("-var=hetzner_dns_api_token={}", self.hetzner_dns_api_token),
        ]
    }
}

/// The six supported tofu subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TofuAction {
    Plan,
    Apply,
    Init,
    Validate,
    Fmt,
    Destroy,
}

impl TofuAction {
    pub const fn subcommand(&self) -> &'static str {
        match self {
            TofuAction::Plan => "plan",
            TofuAction::Apply => "apply",
            TofuAction::Init => "init",
            TofuAction::Validate => "validate",
            TofuAction::Fmt => "fmt",
            TofuAction::Destroy => "destroy",
        }
    }

    /// Whether this action carries the three secret-backed variable
    /// assignments. init/validate/fmt never reference secrets.
    pub const fn takes_vars(&self) -> bool {
        matches!(self, TofuAction::Plan | TofuAction::Apply | TofuAction::Destroy)
    }
}

impl fmt::Display for TofuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// A single composed tofu invocation.
///
/// Constructed through the per-operation functions below so that each
/// operation only exposes the flags it actually supports. Absent optional
/// parameters contribute nothing to the composed argv.
#[derive(Debug, Clone)]
pub struct Invocation {
    action: TofuAction,
    target: Option<String>,
    auto_approve: bool,
    check: bool,
}

impl Invocation {
    /// `tofu plan`, optionally scoped with `-target=<addr>`.
    pub fn plan(target: Option<&str>) -> Result<Self> {
        Ok(Self {
            action: TofuAction::Plan,
            target: validate_target(target)?,
            auto_approve: false,
            check: false,
        })
    }

    /// `tofu apply`, optionally scoped and/or with `-auto-approve`.
    pub fn apply(target: Option<&str>, auto_approve: bool) -> Result<Self> {
        Ok(Self {
            action: TofuAction::Apply,
            target: validate_target(target)?,
            auto_approve,
            check: false,
        })
    }

    /// `tofu init`. No variables, no flags.
    pub fn init() -> Self {
        Self::bare(TofuAction::Init)
    }

    /// `tofu validate`. No variables, no flags.
    pub fn validate() -> Self {
        Self::bare(TofuAction::Validate)
    }

    /// `tofu fmt`, with `-check` verifying formatting instead of rewriting.
    pub fn fmt(check: bool) -> Self {
        Self {
            check,
            ..Self::bare(TofuAction::Fmt)
        }
    }

    /// `tofu destroy`, optionally with `-auto-approve`.
    pub fn destroy(auto_approve: bool) -> Self {
        Self {
            auto_approve,
            ..Self::bare(TofuAction::Destroy)
        }
    }

    fn bare(action: TofuAction) -> Self {
        Self {
            action,
            target: None,
            auto_approve: false,
            check: false,
        }
    }

    pub fn action(&self) -> TofuAction {
        self.action
    }

    /// Full argument vector for the tofu binary, subcommand first.
    ///
    /// Flag order matches the tool's conventional invocation: variable
    /// assignments, then `-target`, then `-auto-approve` / `-check`.
    pub fn args(&self, secrets: &Secrets) -> Vec<String> {
        let mut args = vec![self.action.subcommand().to_string()];
        if self.action.takes_vars() {
            args.extend(secrets.var_args());
        }
        if let Some(t) = &self.target {
            args.push(format!("-target={t}"));
        }
        if self.auto_approve {
            args.push("-auto-approve".to_string());
        }
        if self.check {
            args.push("-check".to_string());
        }
        args
    }

    /// Shell-style rendering for logs and `--dry-run`.
    ///
    /// References the backing environment variables by name, so secret
    /// values never reach output that might be captured. This string is
    /// display-only; execution goes through `args()`.
    pub fn shell_line(&self) -> String {
        let mut line = format!("cd {TOFU_DIR} && {TOFU_BIN} {}", self.action.subcommand());
        if self.action.takes_vars() {
            line.push_str(&format!(
                " -var=\"hcloud_token=${ENV_HCLOUD_TOKEN}\" \
                 -var=\"letsencrypt_email=${ENV_LETSENCRYPT_EMAIL}\" \
                 -var=\"hetzner_dns_api_token=${ENV_HETZNER_DNS_API_TOKEN}\""
            ));
        }
        if let Some(t) = &self.target {
            line.push_str(&format!(" -target={t}"));
        }
        if self.auto_approve {
            line.push_str(" -auto-approve");
        }
        if self.check {
            line.push_str(" -check");
        }
        line
    }
}

/// Normalize an optional target address.
///
/// A resource/module address never contains whitespace; a blank or
/// whitespace-bearing value is a caller mistake, not something to pass
/// through to tofu.
fn validate_target(raw: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("target is empty");
    }
    if trimmed.chars().any(char::is_whitespace) {
        bail!("target '{trimmed}' contains whitespace; expected a single resource/module address");
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets() -> Secrets {
        Secrets {
            hcloud_token: "hc-token".into(),
            letsencrypt_email: "ops@example.org".into(),
            hetzner_dns_api_token: "dns-token".into(),
        }
    }

    fn count_matches(haystack: &[String], needle: &str) -> usize {
        haystack.iter().filter(|a| a.contains(needle)).count()
    }

    #[test]
    fn plan_without_target_has_no_optional_flags() {
        let inv = Invocation::plan(None).unwrap();
        let args = inv.args(&secrets());
        assert!(!args.iter().any(|a| a.starts_with("-target=")));
        assert!(!args.contains(&"-auto-approve".to_string()));
        assert!(!args.contains(&"-check".to_string()));
    }

    #[test]
    fn plan_target_appears_exactly_once() {
        let inv = Invocation::plan(Some("module.workload_cluster")).unwrap();
        let args = inv.args(&secrets());
        assert_eq!(count_matches(&args, "-target=module.workload_cluster"), 1);
    }

    #[test]
    fn variable_bearing_actions_carry_three_assignments() {
        for inv in [
            Invocation::plan(None).unwrap(),
            Invocation::apply(None, false).unwrap(),
            Invocation::destroy(false),
        ] {
            let args = inv.args(&secrets());
            assert_eq!(count_matches(&args, "-var="), 3, "{}", inv.action());
            assert!(args.contains(&"-var=hcloud_token=hc-token".to_string()));
            assert!(args.contains(&"-var=letsencrypt_email=ops@example.org".to_string()));
            assert!(args.contains(&"-var=hetzner_dns_api_token=dns-token".to_string()));
        }
    }

    #[test]
    fn init_validate_fmt_never_reference_secrets() {
        for inv in [
            Invocation::init(),
            Invocation::validate(),
            Invocation::fmt(true),
        ] {
            let args = inv.args(&secrets());
            assert_eq!(count_matches(&args, "-var="), 0, "{}", inv.action());
            assert!(!args.iter().any(|a| a.contains("token")), "{}", inv.action());
        }
    }

    #[test]
    fn apply_auto_approve_toggles_flag() {
        let on = Invocation::apply(None, true).unwrap();
        assert!(on.args(&secrets()).contains(&"-auto-approve".to_string()));
        let off = Invocation::apply(None, false).unwrap();
        assert!(!off.args(&secrets()).contains(&"-auto-approve".to_string()));
    }

    #[test]
    fn apply_target_and_approve_ordering() {
        let inv = Invocation::apply(Some("module.db"), true).unwrap();
        let args = inv.args(&secrets());
        let target_idx = args.iter().position(|a| a == "-target=module.db").unwrap();
        let approve_idx = args.iter().position(|a| a == "-auto-approve").unwrap();
        assert!(target_idx < approve_idx);
    }

    #[test]
    fn fmt_check_toggles_flag() {
        let checked = Invocation::fmt(true);
        assert_eq!(checked.args(&secrets()), vec!["fmt", "-check"]);
        let in_place = Invocation::fmt(false);
        assert_eq!(in_place.args(&secrets()), vec!["fmt"]);
    }

    #[test]
    fn destroy_auto_approve_appended_last() {
        let args = Invocation::destroy(true).args(&secrets());
        assert_eq!(args.last().map(String::as_str), Some("-auto-approve"));
    }

    #[test]
    fn plan_shell_line_matches_reference_form() {
        let inv = Invocation::plan(None).unwrap();
        assert_eq!(
            inv.shell_line(),
            "cd terraform && tofu plan \
             -var=\"hcloud_token=$HCLOUD_TOKEN\" \
             -var=\"letsencrypt_email=$LETSENCRYPT_EMAIL\" \
             -var=\"hetzner_dns_api_token=$HETZNER_DNS_API_TOKEN\""
        );
    }

    #[test]
    fn destroy_shell_line_with_auto_approve() {
        let inv = Invocation::destroy(true);
        assert_eq!(
            inv.shell_line(),
            "cd terraform && tofu destroy \
             -var=\"hcloud_token=$HCLOUD_TOKEN\" \
             -var=\"letsencrypt_email=$LETSENCRYPT_EMAIL\" \
             -var=\"hetzner_dns_api_token=$HETZNER_DNS_API_TOKEN\" -auto-approve"
        );
    }

    #[test]
    fn shell_line_never_contains_secret_values() {
        let inv = Invocation::apply(Some("module.db"), true).unwrap();
        let line = inv.shell_line();
        assert!(!line.contains("hc-token"));
        assert!(line.contains("$HCLOUD_TOKEN"));
    }

    #[test]
    fn blank_target_rejected() {
        let err = Invocation::plan(Some("   ")).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn whitespace_target_rejected() {
        let err = Invocation::apply(Some("module.a module.b"), false).unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn target_is_trimmed() {
        let inv = Invocation::plan(Some("  module.db  ")).unwrap();
        assert!(inv.args(&secrets()).contains(&"-target=module.db".to_string()));
    }
}
