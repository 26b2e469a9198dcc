use crate::domain::models::{
    CrossAccountAccess, DeploymentReport, KEY_API_ENDPOINT, KEY_EXTERNAL_ID,
    KEY_LAMBDA_FUNCTION_ARN, KEY_ROLE_ARN, MCP_ROUTE, PLACEHOLDER,
};
use crate::error::DeployError;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Stack name -> output key -> rendered value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputsFile {
    stacks: BTreeMap<String, BTreeMap<String, String>>,
}

impl OutputsFile {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let doc: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            serde_json::from_str(raw)?;
        let stacks = doc
            .into_iter()
            .map(|(stack, outputs)| {
                let outputs = outputs
                    .into_iter()
                    .map(|(k, v)| (k, render_value(v)))
                    .collect();
                (stack, outputs)
            })
            .collect();
        Ok(Self { stacks })
    }

    pub fn load(path: &Path) -> Result<Self, DeployError> {
        if !path.exists() {
            return Err(DeployError::OutputsMissing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw).map_err(|source| DeployError::OutputsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, stack: &str, key: &str) -> Option<&str> {
        self.stacks
            .get(stack)
            .and_then(|o| o.get(key))
            .map(String::as_str)
    }

    pub fn has_stack(&self, stack: &str) -> bool {
        self.stacks.contains_key(stack)
    }
}

fn render_value(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// External ID the stack derives for a remote account.
pub fn expected_external_id(stack_name: &str, remote_account_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:avatar-integration", stack_name, remote_account_id).as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(43);
    id
}

pub struct ReportContext<'a> {
    pub stack_name: &'a str,
    pub region: Option<&'a str>,
    pub profile: Option<&'a str>,
    pub remote_account_id: Option<&'a str>,
}

pub fn build_report(outputs: &OutputsFile, ctx: &ReportContext<'_>) -> DeploymentReport {
    if !outputs.has_stack(ctx.stack_name) {
        tracing::warn!(stack = ctx.stack_name, "stack not present in outputs file");
    }
    let field = |key: &str| {
        outputs
            .get(ctx.stack_name, key)
            .unwrap_or(PLACEHOLDER)
            .to_string()
    };

    let api_endpoint = field(KEY_API_ENDPOINT);
    let mcp_endpoint = match outputs.get(ctx.stack_name, KEY_API_ENDPOINT) {
        Some(url) if !url.is_empty() => {
            if url.ends_with('/') {
                format!("{}{}", url, MCP_ROUTE)
            } else {
                format!("{}/{}", url, MCP_ROUTE)
            }
        }
        _ => PLACEHOLDER.to_string(),
    };

    let cross_account = match outputs.get(ctx.stack_name, KEY_ROLE_ARN) {
        Some(arn) if !arn.is_empty() => {
            let external_id = field(KEY_EXTERNAL_ID);
            if let Some(remote) = ctx.remote_account_id {
                let expected = expected_external_id(ctx.stack_name, remote);
                if external_id != expected {
                    tracing::warn!(
                        remote_account_id = remote,
                        "external ID in outputs does not match the one derived for this account"
                    );
                }
            }
            Some(CrossAccountAccess {
                role_arn: arn.to_string(),
                external_id,
                remote_account_id: ctx.remote_account_id.map(str::to_string),
            })
        }
        _ => None,
    };

    DeploymentReport {
        stack_name: ctx.stack_name.to_string(),
        region: ctx.region.map(str::to_string),
        profile: ctx.profile.map(str::to_string),
        api_endpoint,
        mcp_endpoint,
        lambda_function_arn: field(KEY_LAMBDA_FUNCTION_ARN),
        cross_account,
    }
}
