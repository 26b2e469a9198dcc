use serde::Serialize;

/// Printed in place of any output the stack did not export.
pub const PLACEHOLDER: &str = "N/A";

pub const KEY_API_ENDPOINT: &str = "ApiEndpoint";
pub const KEY_LAMBDA_FUNCTION_ARN: &str = "LambdaFunctionArn";
pub const KEY_ROLE_ARN: &str = "AvatarIntegrationRoleArn";
pub const KEY_EXTERNAL_ID: &str = "AvatarIntegrationExternalId";

/// Route the API exposes the MCP server on, relative to the endpoint URL.
pub const MCP_ROUTE: &str = "mcp";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    pub stack_name: String,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub api_endpoint: String,
    pub mcp_endpoint: String,
    pub lambda_function_arn: String,
    pub cross_account: Option<CrossAccountAccess>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CrossAccountAccess {
    pub role_arn: String,
    pub external_id: String,
    pub remote_account_id: Option<String>,
}
