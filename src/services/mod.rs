//! Service layer containing the deploy steps and their side effects.
//!
//! ## Service map
//! - `venv.rs` — virtualenv creation and dependency install.
//! - `toolchain.rs` — process runner seam + cdk bootstrap/deploy invocations.
//! - `outputs.rs` — outputs file loading and report extraction.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Every external process goes through `toolchain::ProcessRunner`.
//! - Keep the command layer thin; delegate to services.

pub mod output;
pub mod outputs;
pub mod toolchain;
pub mod venv;
