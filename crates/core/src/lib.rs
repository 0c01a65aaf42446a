//! Domain core for the HR onboarding/exit service.
//!
//! Zero I/O: everything here is plain data and pure functions so the
//! repository layer, the HTTP layer and the tests can share it.

pub mod audit;
pub mod checklist;
pub mod dashboard;
pub mod error;
pub mod lifecycle;
pub mod roles;
pub mod search;
pub mod types;
pub mod validation;
