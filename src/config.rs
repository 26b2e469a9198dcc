use crate::cli::Cli;
use std::path::{Path, PathBuf};

pub const CDK_BIN_ENV: &str = "CFM_DEPLOY_CDK";
pub const PYTHON_BIN_ENV: &str = "CFM_DEPLOY_PYTHON";

const DEFAULT_CDK_BIN: &str = "cdk";
const DEFAULT_PYTHON_BIN: &str = "python3";

/// Everything the deploy pipeline needs, resolved once from flags and env.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub remote_account_id: Option<String>,
    pub stack_name: String,
    pub project_dir: PathBuf,
    pub outputs_file: PathBuf,
    pub lambda_memory_size: Option<u32>,
    pub lambda_timeout: Option<u32>,
    pub skip_venv: bool,
    pub json: bool,
    pub cdk_bin: String,
    pub python_bin: String,
}

impl DeployConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Self {
        let project_dir = absolute_dir(&cli.project_dir);
        let outputs_file = if cli.outputs_file.is_absolute() {
            cli.outputs_file.clone()
        } else {
            project_dir.join(&cli.outputs_file)
        };
        Self {
            profile: non_empty(cli.profile.clone()),
            region: non_empty(cli.region.clone()),
            remote_account_id: non_empty(cli.remote_account_id.clone()),
            stack_name: cli.stack_name.clone(),
            project_dir,
            outputs_file,
            lambda_memory_size: cli.lambda_memory_size,
            lambda_timeout: cli.lambda_timeout,
            skip_venv: cli.skip_venv,
            json: cli.json,
            cdk_bin: non_empty(env(CDK_BIN_ENV)).unwrap_or_else(|| DEFAULT_CDK_BIN.to_string()),
            python_bin: non_empty(env(PYTHON_BIN_ENV))
                .unwrap_or_else(|| DEFAULT_PYTHON_BIN.to_string()),
        }
    }

    pub fn infra_dir(&self) -> PathBuf {
        self.project_dir.join("infra")
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.project_dir.join(".venv")
    }

    /// Region variables exported to the external tool.
    pub fn region_env(&self) -> Vec<(String, String)> {
        match &self.region {
            Some(r) => vec![
                ("AWS_DEFAULT_REGION".to_string(), r.clone()),
                ("CDK_DEFAULT_REGION".to_string(), r.clone()),
            ],
            None => vec![],
        }
    }

    /// CDK context values, in the order they are passed on the command line.
    pub fn context(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(id) = &self.remote_account_id {
            out.push(("remote_account_id", id.clone()));
        }
        if let Some(mb) = self.lambda_memory_size {
            out.push(("lambda_memory_size", mb.to_string()));
        }
        if let Some(secs) = self.lambda_timeout {
            out.push(("lambda_timeout", secs.to_string()));
        }
        out
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

// Child tools run inside infra/, so every path handed to them (venv, outputs
// file) must be absolute or it resolves against the wrong directory.
fn absolute_dir(dir: &Path) -> PathBuf {
    if let Ok(p) = dir.canonicalize() {
        return p;
    }
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
