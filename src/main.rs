//! cfm-deploy - bootstrap and deploy the CFM Tips MCP stack, then report its outputs.

use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod services;

use crate::cli::{parse_args, Invocation};
use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::services::toolchain::SystemRunner;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Info(text) => {
            print!("{}", text);
            return ExitCode::SUCCESS;
        }
        Invocation::Usage(text) => {
            let err = DeployError::Usage(text);
            eprint!("{}", err);
            return exit_code(err.exit_code());
        }
    };

    init_tracing();

    let cfg = DeployConfig::from_cli(&cli);
    tracing::debug!(?cfg, "resolved deploy configuration");

    match commands::handle_deploy(&mut SystemRunner, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit_with(err),
    }
}

fn exit_with(err: anyhow::Error) -> ExitCode {
    let code = match err.downcast_ref::<DeployError>() {
        Some(e @ DeployError::OutputsMissing(_)) => {
            eprintln!("Warning: {}", e);
            e.exit_code()
        }
        Some(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
        None => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    exit_code(code)
}

// Statuses outside 0..=255 cannot be reported faithfully.
fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
