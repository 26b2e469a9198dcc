use crate::domain::models::{DeploymentReport, JsonOut, PLACEHOLDER};
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        print!("{}", render(&data));
    }
    Ok(())
}

pub fn render_report(r: &DeploymentReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("Deployment complete\n");
    out.push_str(&format!("  stack:        {}\n", r.stack_name));
    out.push_str(&format!(
        "  region:       {}\n",
        r.region.as_deref().unwrap_or(PLACEHOLDER)
    ));
    out.push_str(&format!("  api endpoint: {}\n", r.api_endpoint));
    out.push_str(&format!("  mcp endpoint: {}\n", r.mcp_endpoint));
    out.push_str(&format!("  function arn: {}\n", r.lambda_function_arn));

    if let Some(x) = &r.cross_account {
        out.push('\n');
        out.push_str("Cross-account access\n");
        if let Some(remote) = &x.remote_account_id {
            out.push_str(&format!("  remote account: {}\n", remote));
        }
        out.push_str(&format!("  role arn:       {}\n", x.role_arn));
        out.push_str(&format!("  external id:    {}\n", x.external_id));
        out.push_str("  assume from the remote account with:\n");
        out.push_str(&format!(
            "    aws sts assume-role --role-arn {} --role-session-name cfm-tips-mcp --external-id {}\n",
            x.role_arn, x.external_id
        ));
    }
    out
}
