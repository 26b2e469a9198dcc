//! Shared data model layer (structs/constants only).
//!
//! - `models.rs` — output key names, report structs, JSON envelope.
//!
//! Domain types are data-only: no filesystem or process side effects.
//! Changes here alter the `--json` report schema.

pub mod models;
