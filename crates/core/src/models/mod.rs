//! Wire models for every backend resource.
//!
//! Field names follow the backend's camelCase JSON; identifiers with an `ID`
//! suffix are renamed explicitly.

pub mod auth;
pub mod customer;
pub mod project;
pub mod reference;
pub mod role;
pub mod user;
