pub mod employee;
pub mod id;
pub mod project;
pub mod screenshot;
pub mod store;
pub mod task;
pub mod time_log;
