use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_STACK_NAME: &str = "CfmTipsMcpStack";
pub const DEFAULT_OUTPUTS_FILE: &str = "cdk-outputs.json";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cfm-deploy",
    version,
    about = "Deploy the CFM Tips MCP server stack and print its endpoints"
)]
pub struct Cli {
    #[arg(long, value_name = "NAME", help = "Credential profile passed to the CDK CLI")]
    pub profile: Option<String>,
    #[arg(
        long,
        value_name = "REGION",
        help = "Target region (exported as AWS_DEFAULT_REGION and CDK_DEFAULT_REGION)"
    )]
    pub region: Option<String>,
    #[arg(
        long,
        value_name = "ACCOUNT_ID",
        help = "Remote account allowed to assume the cross-account integration role"
    )]
    pub remote_account_id: Option<String>,
    #[arg(
        long,
        value_name = "NAME",
        env = "CFM_DEPLOY_STACK_NAME",
        default_value = DEFAULT_STACK_NAME,
        help = "Stack to deploy and read outputs for"
    )]
    pub stack_name: String,
    #[arg(
        long,
        value_name = "PATH",
        env = "CFM_DEPLOY_OUTPUTS_FILE",
        default_value = DEFAULT_OUTPUTS_FILE,
        help = "Outputs file written by `cdk deploy` (relative to the project dir)"
    )]
    pub outputs_file: PathBuf,
    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Project root containing infra/ and the .venv"
    )]
    pub project_dir: PathBuf,
    #[arg(long, value_name = "MB", help = "Lambda memory size forwarded as CDK context")]
    pub lambda_memory_size: Option<u32>,
    #[arg(long, value_name = "SECS", help = "Lambda timeout forwarded as CDK context")]
    pub lambda_timeout: Option<u32>,
    #[arg(long, help = "Skip virtualenv creation and dependency install")]
    pub skip_venv: bool,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
}

/// Result of reading argv: either flags to run with, or an early exit.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// `--help` or `--version` was rendered; exit 0 after printing.
    Info(String),
    /// Unknown or incomplete flags; message already includes usage.
    Usage(String),
}

pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run(cli),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Invocation::Info(e.render().to_string())
            }
            _ => Invocation::Usage(e.render().to_string()),
        },
    }
}
