use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DeployError {
    #[error("{0}")]
    Usage(String),
    #[error("environment setup failed: {0}")]
    EnvironmentSetup(String),
    #[error("CDK bootstrap failed")]
    BootstrapFailed,
    #[error("CDK deploy failed with exit code {code}")]
    DeployFailed { code: i32 },
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("outputs file not found: {}", .0.display())]
    OutputsMissing(PathBuf),
    #[error("invalid outputs file {}: {source}", .path.display())]
    OutputsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Process exit status for this failure. A failed deploy hands back the
    /// tool's own status; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::DeployFailed { code } => *code,
            _ => 1,
        }
    }
}
