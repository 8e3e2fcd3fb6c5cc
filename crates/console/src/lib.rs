//! Console front end for the PID tool: the project lifecycle controller,
//! generic CRUD screens, prompts and table rendering used by the `pidgen`
//! binary.

pub mod confirm;
pub mod crud;
pub mod projects;
pub mod render;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "pidgen=info,pidgen_client=info,pidgen_console=info";
