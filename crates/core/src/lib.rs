//! Domain layer of the PID tool client.
//!
//! Wire models, workflow status and roles, the lifecycle action table,
//! reference-data enrichment, payload normalization and list ordering.
//! Everything here is synchronous and free of I/O.

pub mod enrichment;
pub mod error;
pub mod lifecycle;
pub mod listing;
pub mod models;
pub mod operation;
pub mod payload;
pub mod roles;
pub mod status;
pub mod types;
