//! Command handler layer.
//!
//! - `deploy.rs` — the bootstrap/deploy/report pipeline.
//!
//! Handlers wire services together and own output; logic lives in `services/*`.

pub mod deploy;

pub use deploy::handle_deploy;
