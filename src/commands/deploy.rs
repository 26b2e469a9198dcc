use crate::config::DeployConfig;
use crate::domain::models::DeploymentReport;
use crate::error::DeployError;
use crate::services::output::{print_one, render_report};
use crate::services::outputs::{build_report, OutputsFile, ReportContext};
use crate::services::toolchain::{run_bootstrap, run_deploy, ProcessRunner};
use crate::services::venv;

/// venv -> bootstrap -> deploy -> read outputs. Each step is fatal on failure.
pub fn deploy_stack(
    runner: &mut dyn ProcessRunner,
    cfg: &DeployConfig,
) -> Result<DeploymentReport, DeployError> {
    let tool_env = if cfg.skip_venv {
        tracing::info!("skipping virtualenv preparation");
        Vec::new()
    } else {
        venv::prepare(runner, cfg)?
    };

    eprintln!("Bootstrapping CDK environment");
    run_bootstrap(runner, cfg, &tool_env)?;

    eprintln!("Deploying {}", cfg.stack_name);
    run_deploy(runner, cfg, &tool_env)?;

    let outputs = OutputsFile::load(&cfg.outputs_file)?;
    Ok(build_report(
        &outputs,
        &ReportContext {
            stack_name: &cfg.stack_name,
            region: cfg.region.as_deref(),
            profile: cfg.profile.as_deref(),
            remote_account_id: cfg.remote_account_id.as_deref(),
        },
    ))
}

pub fn handle_deploy(runner: &mut dyn ProcessRunner, cfg: &DeployConfig) -> anyhow::Result<()> {
    let report = deploy_stack(runner, cfg)?;
    print_one(cfg.json, report, render_report)
}
