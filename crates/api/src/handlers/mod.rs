pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod task;
