use crate::config::DeployConfig;
use crate::error::DeployError;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// A fully-resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, a: impl Into<String>) -> Self {
        self.args.push(a.into());
        self
    }

    pub fn args<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Seam over process execution so the pipeline can be driven without a real toolchain.
pub trait ProcessRunner {
    fn run(&mut self, cmd: &ToolCommand) -> std::io::Result<ExitStatus>;
}

/// Runs commands with inherited stdio and blocks until they exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, cmd: &ToolCommand) -> std::io::Result<ExitStatus> {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }
        for (k, v) in &cmd.env {
            command.env(k, v);
        }
        command.status()
    }
}

fn with_common_flags(mut cmd: ToolCommand, cfg: &DeployConfig) -> ToolCommand {
    if let Some(profile) = &cfg.profile {
        cmd = cmd.arg("--profile").arg(profile.clone());
    }
    for (key, value) in cfg.context() {
        cmd = cmd.arg("-c").arg(format!("{}={}", key, value));
    }
    cmd
}

pub fn bootstrap_command(cfg: &DeployConfig, extra_env: &[(String, String)]) -> ToolCommand {
    let cmd = ToolCommand::new(cfg.cdk_bin.clone())
        .arg("bootstrap")
        .current_dir(cfg.infra_dir())
        .envs(cfg.region_env())
        .envs(extra_env.iter().cloned());
    with_common_flags(cmd, cfg)
}

pub fn deploy_command(cfg: &DeployConfig, extra_env: &[(String, String)]) -> ToolCommand {
    let cmd = ToolCommand::new(cfg.cdk_bin.clone())
        .arg("deploy")
        .arg(cfg.stack_name.clone())
        .args(["--require-approval", "never", "--outputs-file"])
        .arg(cfg.outputs_file.to_string_lossy().to_string())
        .current_dir(cfg.infra_dir())
        .envs(cfg.region_env())
        .envs(extra_env.iter().cloned());
    with_common_flags(cmd, cfg)
}

pub fn run_bootstrap(
    runner: &mut dyn ProcessRunner,
    cfg: &DeployConfig,
    extra_env: &[(String, String)],
) -> Result<(), DeployError> {
    let cmd = bootstrap_command(cfg, extra_env);
    tracing::info!(command = %cmd.display(), "running bootstrap");
    match runner.run(&cmd) {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            tracing::error!(?status, "bootstrap exited unsuccessfully");
            Err(DeployError::BootstrapFailed)
        }
        Err(e) => {
            tracing::error!(error = %e, command = %cmd.program, "could not start bootstrap");
            Err(DeployError::BootstrapFailed)
        }
    }
}

pub fn run_deploy(
    runner: &mut dyn ProcessRunner,
    cfg: &DeployConfig,
    extra_env: &[(String, String)],
) -> Result<(), DeployError> {
    let cmd = deploy_command(cfg, extra_env);
    tracing::info!(command = %cmd.display(), "running deploy");
    let status = runner.run(&cmd).map_err(|source| DeployError::Spawn {
        command: cmd.display(),
        source,
    })?;
    if status.success() {
        return Ok(());
    }
    // A signal-terminated child has no code.
    let code = status.code().unwrap_or(1);
    tracing::error!(code, "deploy exited unsuccessfully");
    Err(DeployError::DeployFailed { code })
}
