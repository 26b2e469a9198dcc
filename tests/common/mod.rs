#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_CDK: &str = r#"#!/bin/sh
echo "cdk $*" >> "$FAKE_LOG"
echo "env AWS_DEFAULT_REGION=$AWS_DEFAULT_REGION CDK_DEFAULT_REGION=$CDK_DEFAULT_REGION VIRTUAL_ENV=$VIRTUAL_ENV" >> "$FAKE_LOG"
echo "interpreter VIRTUAL_ENV=$VIRTUAL_ENV python3=$(command -v python3)" >> "$FAKE_LOG"
case "$1" in
  bootstrap)
    exit "${FAKE_BOOTSTRAP_EXIT:-0}"
    ;;
  deploy)
    prev=""
    for a in "$@"; do
      if [ "$prev" = "--outputs-file" ] && [ -n "$FAKE_OUTPUTS" ]; then
        cp "$FAKE_OUTPUTS" "$a"
      fi
      prev="$a"
    done
    exit "${FAKE_DEPLOY_EXIT:-0}"
    ;;
esac
exit 0
"#;

const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "python $*" >> "$FAKE_LOG"
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
  mkdir -p "$3/bin"
  : > "$3/bin/python"
  printf '#!/bin/sh\nexit 0\n' > "$3/bin/python3"
  chmod +x "$3/bin/python3"
  printf '#!/bin/sh\necho "pip $*" >> "$FAKE_LOG"\nexit 0\n' > "$3/bin/pip"
  chmod +x "$3/bin/pip"
fi
exit 0
"#;

/// Isolated project dir with fake `cdk` and `python3` executables that log to a file.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
    pub log: PathBuf,
    cdk: PathBuf,
    python: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let project = tmp.path().join("project");
        let tools = tmp.path().join("tools");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(project.join("infra")).expect("create infra dir");
        fs::create_dir_all(&tools).expect("create tools dir");

        let cdk = write_script(&tools.join("cdk"), FAKE_CDK);
        let python = write_script(&tools.join("python3"), FAKE_PYTHON);
        let log = tmp.path().join("calls.log");

        Self {
            _tmp: tmp,
            home,
            project,
            log,
            cdk,
            python,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.cmd_in_project();
        cmd.arg("--project-dir").arg(&self.project);
        cmd
    }

    /// Runs from inside the project with the default relative `--project-dir`.
    pub fn cmd_in_project(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("cfm-deploy");
        cmd.env("HOME", &self.home)
            .env("CFM_DEPLOY_CDK", &self.cdk)
            .env("CFM_DEPLOY_PYTHON", &self.python)
            .env("FAKE_LOG", &self.log)
            .env_remove("AWS_DEFAULT_REGION")
            .env_remove("CDK_DEFAULT_REGION")
            .env_remove("VIRTUAL_ENV")
            .env_remove("CFM_DEPLOY_STACK_NAME")
            .env_remove("CFM_DEPLOY_OUTPUTS_FILE")
            .env_remove("RUST_LOG")
            .current_dir(&self.project);
        cmd
    }

    /// Makes the fake `cdk deploy` write `outputs` as its outputs file.
    pub fn with_outputs(&self, cmd: &mut Command, outputs: Value) {
        let fixture = self.project.join("fixture-outputs.json");
        fs::write(
            &fixture,
            serde_json::to_string_pretty(&outputs).expect("serialize outputs"),
        )
        .expect("write outputs fixture");
        cmd.env("FAKE_OUTPUTS", fixture);
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn project_canonical(&self) -> PathBuf {
        self.project.canonicalize().expect("canonical project dir")
    }

    pub fn tool_calls(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{} ", tool);
        self.calls()
            .into_iter()
            .filter(|l| l.starts_with(&prefix))
            .collect()
    }
}

fn write_script(path: &Path, body: &str) -> PathBuf {
    fs::write(path, body).expect("write script");
    let mut perms = fs::metadata(path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod script");
    path.to_path_buf()
}

pub fn full_outputs() -> Value {
    serde_json::json!({
        "CfmTipsMcpStack": {
            "ApiEndpoint": "https://abc123.execute-api.us-east-1.amazonaws.com/",
            "LambdaFunctionArn": "arn:aws:lambda:us-east-1:111122223333:function:CfmTipsMcpFunction",
            "AvatarIntegrationRoleArn": "arn:aws:iam::111122223333:role/AvatarIntegration-CFMTipsMCP",
            "AvatarIntegrationExternalId": "0123456789abcdef0123456789abcdef0123456789a"
        }
    })
}
