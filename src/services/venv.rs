use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::services::toolchain::{ProcessRunner, ToolCommand};
use std::path::{Path, PathBuf};

/// Installed when the project has no `infra/requirements.txt`.
pub const DEFAULT_REQUIREMENTS: &[&str] = &["aws-cdk-lib", "constructs"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venv {
    pub root: PathBuf,
}

impl Venv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    pub fn python(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("python.exe")
        } else {
            self.bin_dir().join("python")
        }
    }

    pub fn pip(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("pip.exe")
        } else {
            self.bin_dir().join("pip")
        }
    }

    pub fn exists(&self) -> bool {
        self.python().exists()
    }

    /// Variables that make child processes resolve this venv first.
    pub fn activation_env(&self) -> Vec<(String, String)> {
        let mut paths = vec![self.bin_dir()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        let joined = std::env::join_paths(paths)
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| self.bin_dir().to_string_lossy().to_string());
        vec![
            ("PATH".to_string(), joined),
            (
                "VIRTUAL_ENV".to_string(),
                self.root.to_string_lossy().to_string(),
            ),
        ]
    }
}

pub fn create_command(python_bin: &str, venv: &Venv) -> ToolCommand {
    ToolCommand::new(python_bin)
        .args(["-m", "venv"])
        .arg(venv.root.to_string_lossy().to_string())
}

pub fn install_command(venv: &Venv, requirements: Option<&Path>) -> ToolCommand {
    let cmd = ToolCommand::new(venv.pip().to_string_lossy().to_string())
        .args(["install", "--quiet"]);
    match requirements {
        Some(file) => cmd.arg("-r").arg(file.to_string_lossy().to_string()),
        None => cmd.args(DEFAULT_REQUIREMENTS.iter().copied()),
    }
}

fn run_step(runner: &mut dyn ProcessRunner, cmd: &ToolCommand) -> Result<(), DeployError> {
    tracing::debug!(command = %cmd.display(), "environment step");
    let status = runner
        .run(cmd)
        .map_err(|e| DeployError::EnvironmentSetup(format!("{}: {}", cmd.display(), e)))?;
    if !status.success() {
        return Err(DeployError::EnvironmentSetup(format!(
            "{} exited with {}",
            cmd.display(),
            status
        )));
    }
    Ok(())
}

/// Create the venv if absent, then (re)install the dependency set.
/// Returns the env vars later tool invocations should run with.
pub fn prepare(
    runner: &mut dyn ProcessRunner,
    cfg: &DeployConfig,
) -> Result<Vec<(String, String)>, DeployError> {
    let venv = Venv::new(cfg.venv_dir());
    if venv.exists() {
        tracing::info!(venv = %venv.root.display(), "reusing virtualenv");
    } else {
        eprintln!("Creating virtualenv at {}", venv.root.display());
        run_step(runner, &create_command(&cfg.python_bin, &venv))?;
    }

    let req = cfg.infra_dir().join("requirements.txt");
    let req = req.exists().then_some(req);
    eprintln!("Installing infrastructure dependencies");
    run_step(runner, &install_command(&venv, req.as_deref()))?;

    Ok(venv.activation_env())
}
