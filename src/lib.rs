//! Persistence and state transitions for a small time-tracking backend.
//!
//! Employees, projects, tasks, time logs and screenshot metadata live in one
//! JSON document owned by a [`store::DocumentStore`]. Operations in
//! [`services`] take the store handle explicitly and run as a single unit of
//! work each.

pub mod config;
pub mod models;
pub mod notify;
pub mod services;
pub mod storage;
pub mod store;
