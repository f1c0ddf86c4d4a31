//! MCP (Model Context Protocol) server exposing the six tofu operations
//! as tools over stdio, so a hosting agent can drive plan/apply/init/
//! validate/format/destroy without a bespoke plugin contract.
//!
//! The server captures `Secrets` once at construction and reuses it for
//! every call. Tool results carry the child's stdout/stderr/exit code as
//! text; a non-zero tofu exit is reported in the text, not as a protocol
//! error — interpreting failure is the hosting agent's job.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::transport::stdio;
use rmcp::{ErrorData as McpError, ServiceExt, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::log_debug;
use crate::tofu::exec::RunOutput;
use crate::tofu::{Invocation, Secrets, exec};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlanRequest {
    /// Optional target to plan (e.g. 'module.workload_cluster')
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApplyRequest {
    /// Optional target to apply (e.g. 'module.workload_cluster')
    #[serde(default)]
    pub target: Option<String>,
    /// Skip interactive approval prompt (default: false)
    #[serde(default, rename = "autoApprove")]
    pub auto_approve: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FormatRequest {
    /// Check formatting without modifying files (default: false)
    #[serde(default)]
    pub check: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DestroyRequest {
    /// Skip interactive approval prompt (default: false)
    #[serde(default, rename = "autoApprove")]
    pub auto_approve: bool,
}

/// MCP server wrapping the tofu invocation core.
#[derive(Clone)]
pub struct TofuServer {
    secrets: Secrets,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TofuServer {
    pub fn new() -> Self {
        Self {
            secrets: Secrets::from_env(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Run 'tofu plan' in the terraform directory")]
    async fn plan(
        &self,
        Parameters(req): Parameters<PlanRequest>,
    ) -> Result<CallToolResult, McpError> {
        let inv = Invocation::plan(req.target.as_deref())
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        self.execute(inv).await
    }

    #[tool(description = "Run 'tofu apply' in the terraform directory")]
    async fn apply(
        &self,
        Parameters(req): Parameters<ApplyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let inv = Invocation::apply(req.target.as_deref(), req.auto_approve)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        self.execute(inv).await
    }

    #[tool(description = "Run 'tofu init' in the terraform directory")]
    async fn init(&self) -> Result<CallToolResult, McpError> {
        self.execute(Invocation::init()).await
    }

    #[tool(description = "Run 'tofu validate' to validate terraform files")]
    async fn validate(&self) -> Result<CallToolResult, McpError> {
        self.execute(Invocation::validate()).await
    }

    #[tool(description = "Format or check terraform code formatting")]
    async fn format(
        &self,
        Parameters(req): Parameters<FormatRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.execute(Invocation::fmt(req.check)).await
    }

    #[tool(description = "Run 'tofu destroy' to destroy infrastructure")]
    async fn destroy(
        &self,
        Parameters(req): Parameters<DestroyRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.execute(Invocation::destroy(req.auto_approve)).await
    }

    async fn execute(&self, inv: Invocation) -> Result<CallToolResult, McpError> {
        log_debug!("mcp call: {}", inv.shell_line());
        let out = exec::run_async(&inv, &self.secrets)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(render_output(
            &out,
        ))]))
    }
}

impl Default for TofuServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl rmcp::ServerHandler for TofuServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tools for the terraform/ directory: plan, apply, init, validate, \
                 format, destroy. plan/apply/destroy read HCLOUD_TOKEN, \
                 LETSENCRYPT_EMAIL and HETZNER_DNS_API_TOKEN from the server's \
                 environment."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Flatten a run into tool result text. Output streams pass through
/// unmodified; a non-zero exit is prefixed so the agent sees the status.
fn render_output(out: &RunOutput) -> String {
    if out.success() {
        let mut text = out.stdout.clone();
        if !out.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&out.stderr);
        }
        text
    } else {
        format!(
            "Error (exit {}):\n{}{}",
            out.exit_code, out.stdout, out.stderr
        )
    }
}

/// Serve until the stdio transport closes.
pub async fn run_server() -> anyhow::Result<()> {
    let service = TofuServer::new().serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_request_fields_are_optional() {
        let req: PlanRequest = serde_json::from_str("{}").unwrap();
        assert!(req.target.is_none());
        let req: PlanRequest =
            serde_json::from_str(r#"{"target":"module.workload_cluster"}"#).unwrap();
        assert_eq!(req.target.as_deref(), Some("module.workload_cluster"));
    }

    #[test]
    fn apply_request_uses_camel_case_approve() {
        let req: ApplyRequest = serde_json::from_str(r#"{"autoApprove":true}"#).unwrap();
        assert!(req.auto_approve);
        let req: ApplyRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.auto_approve);
    }

    #[test]
    fn destroy_request_defaults_to_interactive() {
        let req: DestroyRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.auto_approve);
    }

    #[test]
    fn render_output_success_passes_streams_through() {
        let out = RunOutput {
            stdout: "No changes.\n".into(),
            stderr: String::new(),
            exit_code: 0,
        };
        assert_eq!(render_output(&out), "No changes.\n");
    }

    #[test]
    fn render_output_failure_prefixes_exit_code() {
        let out = RunOutput {
            stdout: String::new(),
            stderr: "Error: Invalid function argument\n".into(),
            exit_code: 1,
        };
        let text = render_output(&out);
        assert!(text.starts_with("Error (exit 1):"));
        assert!(text.contains("Invalid function argument"));
    }
}
