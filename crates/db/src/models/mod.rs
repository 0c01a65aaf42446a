//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs for request bodies
//! - Typed filter structs built by the HTTP layer after validation

pub mod audit;
pub mod dashboard;
pub mod employee;
pub mod task;
pub mod user;
